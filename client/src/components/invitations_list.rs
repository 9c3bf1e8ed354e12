//! Pending-invitation list shown on the dashboard.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::invites::InviteState;
use crate::state::notices::NoticeState;

/// Invitations addressed to the signed-in user, with accept actions.
///
/// `on_accepted` is the explicit refresh hook: the dashboard passes a
/// callback that refetches its board list, so accepting an invitation never
/// needs an ambient cross-view channel.
#[component]
pub fn InvitationsList(on_accepted: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let invites = expect_context::<RwSignal<InviteState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let fetched_for = RwSignal::new(None::<String>);

    // Fetch once per signed-in email.
    Effect::new(move || {
        let Some(user) = auth.get().user else {
            return;
        };
        if fetched_for.get_untracked().as_deref() == Some(user.email.as_str()) {
            return;
        }
        fetched_for.set(Some(user.email.clone()));

        #[cfg(feature = "hydrate")]
        {
            invites.update(|i| i.loading = true);
            leptos::task::spawn_local(async move {
                let items = crate::net::api::fetch_user_invitations(&user.email).await;
                invites.update(|i| {
                    i.items = items;
                    i.loading = false;
                });
            });
        }
    });

    let accept = Callback::new(move |(id, token): (String, String)| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::accept_invitation(&token).await {
                    Ok(()) => {
                        invites.update(|i| i.remove(&id));
                        notices.update(|n| {
                            n.success("Invitation accepted!");
                        });
                        on_accepted.run(());
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
            let _ = (id, token, &notices, &on_accepted, &invites);
        }
    });

    view! {
        <Show when=move || !invites.get().items.is_empty()>
            <section class="invitations">
                <h2 class="invitations__title">"Invitations"</h2>
                <ul class="invitations__list">
                    <For
                        each=move || invites.get().items
                        key=|invitation| invitation.id.clone()
                        children=move |invitation| {
                            let id = invitation.id.clone();
                            let token = invitation.token.clone();
                            view! {
                                <li class="invitations__item">
                                    <span class="invitations__board">
                                        {invitation
                                            .board_name
                                            .clone()
                                            .unwrap_or_else(|| "a board".to_owned())}
                                    </span>
                                    <span class="invitations__from">
                                        {invitation
                                            .invited_by
                                            .clone()
                                            .map(|name| format!("from {name}"))
                                            .unwrap_or_default()}
                                    </span>
                                    <button
                                        class="btn btn--primary"
                                        on:click=move |_| {
                                            accept.run((id.clone(), token.clone()));
                                        }
                                    >
                                        "Accept"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </Show>
    }
}
