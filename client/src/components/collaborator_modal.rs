//! Share dialog: current collaborators plus invite-by-email.

use leptos::prelude::*;

use crate::state::board::BoardState;
use crate::state::notices::NoticeState;

/// Modal listing a board's collaborators and sending new invitations.
#[component]
pub fn CollaboratorModal(on_close: Callback<()>) -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let email = RwSignal::new(String::new());

    let submit = Callback::new(move |()| {
        let address = email.get().trim().to_owned();
        if address.is_empty() {
            return;
        }
        let Some(board_id) = board.get_untracked().board_id else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::send_invitation(&board_id, &address).await {
                    Ok(()) => {
                        notices.update(|n| {
                            n.success("Invitation sent!");
                        });
                        email.set(String::new());
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
            let _ = (board_id, address, &notices);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Share board"</h2>

                <ul class="dialog__collaborators">
                    {move || {
                        let state = board.get();
                        let mut rows = Vec::new();
                        if let Some(owner) = state.owner {
                            rows.push(format!("{owner} (owner)"));
                        }
                        rows.extend(state.collaborators.into_iter().map(|user| user.name));
                        rows.into_iter()
                            .map(|label| view! { <li class="dialog__collaborator">{label}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>

                <label class="dialog__label">
                    "Invite by email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Send invite"
                    </button>
                </div>
            </div>
        </div>
    }
}
