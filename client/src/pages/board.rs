//! Board page — fetches one board, joins its room, and hosts the canvas.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::EventSender;
use crate::components::board_canvas::BoardCanvas;
use crate::components::collaborator_modal::CollaboratorModal;
use crate::state::auth::AuthState;
use crate::state::blocks::BlockStore;
use crate::state::board::{BoardState, ConnectionStatus};
use crate::sync::pending::PendingSet;

/// Board page — reads the board id from the route, loads the board over
/// REST, joins the realtime room, and re-syncs the full board whenever the
/// channel reconnects (missed events are never replayed).
#[component]
pub fn BoardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let board = expect_context::<RwSignal<BoardState>>();
    let blocks = expect_context::<RwSignal<BlockStore>>();
    let pending = expect_context::<RwSignal<PendingSet>>();
    let sender = expect_context::<RwSignal<EventSender>>();

    crate::util::auth::install_unauth_redirect(auth, use_navigate());

    let params = use_params_map();
    let board_id = move || params.read().get("id");
    let show_collaborators = RwSignal::new(false);
    // One room join per (board, connection epoch), reconnects included.
    let last_join_key = RwSignal::new(None::<(String, u64)>);

    // Reset session state and load the board when the route param changes.
    Effect::new(move || {
        let Some(id) = board_id() else {
            return;
        };
        board.update(|b| {
            b.close();
            b.board_id = Some(id.clone());
            b.loading = true;
        });
        blocks.update(BlockStore::clear);
        pending.update(PendingSet::clear);
        last_join_key.set(None);
        fetch_board_into_state(&id, board, blocks);
    });

    // Join the room once per (board_id, connection epoch). A new epoch for
    // the same board means the channel dropped: re-join and re-fetch.
    Effect::new(move || {
        let state = board.get();
        if state.connection_status != ConnectionStatus::Connected {
            return;
        }
        let Some(id) = state.board_id.clone() else {
            return;
        };
        let key = (id.clone(), state.connection_epoch);
        let previous = last_join_key.get_untracked();
        if previous.as_ref() == Some(&key) {
            return;
        }

        sender
            .get_untracked()
            .send(&crate::util::emit::room_join_envelope(&id));

        let is_resync = matches!(previous, Some((prev_id, prev_epoch))
            if prev_id == id && prev_epoch < state.connection_epoch);
        if is_resync {
            fetch_board_into_state(&id, board, blocks);
        }
        last_join_key.set(Some(key));
    });

    // Leave the room and drop per-board state on navigation away.
    on_cleanup(move || {
        if let Some(id) = board.get_untracked().board_id {
            sender
                .get_untracked()
                .send(&crate::util::emit::room_leave_envelope(&id));
        }
        board.update(BoardState::close);
        blocks.update(BlockStore::clear);
        pending.update(PendingSet::clear);
    });

    let member_count = move || {
        let state = board.get();
        // Owner plus collaborators.
        state.collaborators.len() + 1
    };

    view! {
        <div class="board-page">
            <header class="board-page__header">
                <div class="board-page__header-left">
                    <a class="board-page__back" href="/" title="Back to dashboard">
                        "←"
                    </a>
                    <h1 class="board-page__title">
                        {move || {
                            let state = board.get();
                            if state.loading {
                                "Loading...".to_owned()
                            } else {
                                state.board_name.unwrap_or_else(|| "Untitled board".to_owned())
                            }
                        }}
                    </h1>
                    <span
                        class="board-page__status"
                        class:board-page__status--live=move || {
                            board.get().connection_status == ConnectionStatus::Connected
                        }
                    >
                        {move || match board.get().connection_status {
                            ConnectionStatus::Connected => "live",
                            ConnectionStatus::Connecting => "connecting",
                            ConnectionStatus::Disconnected => "offline",
                        }}
                    </span>
                </div>
                <div class="board-page__header-right">
                    <span class="board-page__members">
                        {move || {
                            let count = member_count();
                            format!("{count} member{}", if count == 1 { "" } else { "s" })
                        }}
                    </span>
                    <button class="btn" on:click=move |_| show_collaborators.set(true)>
                        "Share"
                    </button>
                </div>
            </header>

            {move || {
                board
                    .get()
                    .error
                    .map(|message| {
                        view! {
                            <div class="board-page__error">
                                <h2>"Board not found"</h2>
                                <p>{message}</p>
                            </div>
                        }
                    })
            }}

            <BoardCanvas/>

            <Show when=move || show_collaborators.get()>
                <CollaboratorModal on_close=Callback::new(move |()| show_collaborators.set(false))/>
            </Show>
        </div>
    }
}

/// Fetch a board and fan its pieces out into board metadata and the block
/// store. No-op on the server.
fn fetch_board_into_state(
    id: &str,
    board: RwSignal<BoardState>,
    blocks: RwSignal<BlockStore>,
) {
    #[cfg(feature = "hydrate")]
    {
        let id = id.to_owned();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_board(&id).await {
                Ok(fetched) => {
                    // Ignore a response that lands after navigating away.
                    if board.get_untracked().board_id.as_deref() != Some(id.as_str()) {
                        return;
                    }
                    blocks.update(|store| {
                        store.replace_all(crate::net::envelope::parse_block_list(&fetched.blocks));
                    });
                    board.update(|b| {
                        b.board_name = Some(fetched.name);
                        b.owner = fetched.owner;
                        b.collaborators = fetched.collaborators;
                        b.is_public = fetched.is_public;
                        b.loading = false;
                        b.error = None;
                    });
                }
                Err(message) => {
                    if board.get_untracked().board_id.as_deref() != Some(id.as_str()) {
                        return;
                    }
                    board.update(|b| {
                        b.loading = false;
                        b.error = Some(message);
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, board, blocks);
    }
}
