//! Login page with login/register modes.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Login page — email/password sign-in with a register toggle. A successful
/// sign-in persists the session and navigates to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<crate::state::notices::NoticeState>>();

    let registering = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: go straight to the dashboard.
    let navigate = leptos_router::hooks::use_navigate();
    Effect::new(move || {
        if auth.get().is_authenticated() {
            navigate("/", leptos_router::NavigateOptions::default());
        }
    });

    let submit = Callback::new(move |()| {
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() || busy.get() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let name_value = name.get().trim().to_owned();
            let is_register = registering.get();
            if is_register && name_value.is_empty() {
                return;
            }
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = if is_register {
                    crate::net::api::register(&name_value, &email_value, &password_value).await
                } else {
                    crate::net::api::login(&email_value, &password_value).await
                };
                busy.set(false);
                match result {
                    Ok(session) => {
                        crate::util::auth::store_session(&session.user, &session.token);
                        auth.update(|a| a.sign_in(session.user, session.token));
                    }
                    Err(message) => {
                        notices.update(|n| {
                            n.error(message);
                        });
                    }
                }
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&email_value, &password_value, &notices);
        }
    });

    view! {
        <div class="login-page">
            <div class="login-page__card">
                <h1 class="login-page__title">"Ideaboard"</h1>
                <p class="login-page__subtitle">
                    {move || {
                        if registering.get() { "Create your account" } else { "Welcome back" }
                    }}
                </p>

                <Show when=move || registering.get()>
                    <label class="login-page__label">
                        "Name"
                        <input
                            class="login-page__input"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                </Show>

                <label class="login-page__label">
                    "Email"
                    <input
                        class="login-page__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>

                <label class="login-page__label">
                    "Password"
                    <input
                        class="login-page__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>

                <button
                    class="btn btn--primary login-page__submit"
                    disabled=move || busy.get()
                    on:click=move |_| submit.run(())
                >
                    {move || if registering.get() { "Register" } else { "Log in" }}
                </button>

                <button
                    class="login-page__toggle"
                    on:click=move |_| registering.update(|r| *r = !*r)
                >
                    {move || {
                        if registering.get() {
                            "Have an account? Log in"
                        } else {
                            "New here? Create an account"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
