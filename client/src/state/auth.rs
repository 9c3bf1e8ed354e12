//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and the request layer; the bearer token travels on
//! every REST call, and identity-dependent components read the user record.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user, token, and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True while the persisted session is being restored on startup.
    pub loading: bool,
}

impl AuthState {
    /// Install a fresh session after login/register.
    pub fn sign_in(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.loading = false;
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
