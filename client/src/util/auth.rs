//! Session persistence and shared auth redirect behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token and user record live in `localStorage` so a reload keeps
//! the session; the request layer reads the token on every call. Route
//! components apply identical unauthenticated redirect behavior through
//! [`install_unauth_redirect`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::User;
use crate::state::auth::AuthState;

#[cfg(feature = "hydrate")]
const TOKEN_KEY: &str = "ideaboard:token";
#[cfg(feature = "hydrate")]
const USER_KEY: &str = "ideaboard:user";

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Serialize a user record for storage.
#[cfg(any(test, feature = "hydrate"))]
fn encode_user(user: &User) -> String {
    serde_json::to_string(user).unwrap_or_default()
}

/// Parse a stored user record; `None` for anything unreadable.
#[cfg(any(test, feature = "hydrate"))]
fn decode_user(raw: &str) -> Option<User> {
    serde_json::from_str(raw).ok()
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the persisted bearer token, if any.
#[cfg(feature = "hydrate")]
pub fn stored_token() -> Option<String> {
    local_storage()?.get_item(TOKEN_KEY).ok()?
}

/// Restore a persisted session: both the user record and token must be
/// present and readable.
#[cfg(feature = "hydrate")]
pub fn load_session() -> Option<(User, String)> {
    let storage = local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    let user = decode_user(&storage.get_item(USER_KEY).ok()??)?;
    Some((user, token))
}

/// Persist a fresh session after login/register.
#[cfg(feature = "hydrate")]
pub fn store_session(user: &User, token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
        let _ = storage.set_item(USER_KEY, &encode_user(user));
    }
}

/// Drop the persisted session on logout or auth rejection.
#[cfg(feature = "hydrate")]
pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
