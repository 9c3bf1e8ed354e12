//! Application header with the signed-in user and logout action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Top-of-page chrome shown on the dashboard.
#[component]
pub fn AppHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        crate::util::auth::clear_session();
        auth.update(AuthState::sign_out);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <header class="app-header">
            <a class="app-header__brand" href="/">
                "Ideaboard"
            </a>
            <div class="app-header__session">
                <span class="app-header__user">
                    {move || auth.get().user.map(|u| u.name).unwrap_or_default()}
                </span>
                <button class="btn btn--ghost" on:click=on_logout>
                    "Log out"
                </button>
            </div>
        </header>
    }
}
