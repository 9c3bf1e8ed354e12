//! Dashboard page listing boards with create and invitation actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::board_card::BoardCard;
use crate::components::header::AppHeader;
use crate::components::invitations_list::InvitationsList;
use crate::state::auth::AuthState;
use crate::state::boards::BoardListItem;

/// Dashboard page — board grid, create-board dialog, and pending
/// invitations. Redirects to `/login` when unauthenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, use_navigate());

    // Board list resource — fetches on mount and on demand after changes.
    let boards = LocalResource::new(|| crate::net::api::fetch_boards());

    let show_create = RwSignal::new(false);
    let new_board_name = RwSignal::new(String::new());
    let new_board_public = RwSignal::new(false);

    let on_create = move |_| {
        show_create.set(true);
        new_board_name.set(String::new());
        new_board_public.set(false);
    };
    let on_cancel = Callback::new(move |()| show_create.set(false));

    // Explicit refresh injection: accepting an invitation refetches the
    // board list through this callback, not through an ambient signal.
    let on_boards_changed = Callback::new({
        move |()| {
            boards.refetch();
        }
    });

    view! {
        <div class="dashboard-page">
            <AppHeader/>

            <header class="dashboard-page__header">
                <h1>"Boards"</h1>
                <button class="btn btn--primary" on:click=on_create>
                    "+ New Board"
                </button>
            </header>

            <InvitationsList on_accepted=on_boards_changed/>

            <div class="dashboard-page__grid">
                <Suspense fallback=move || view! { <p>"Loading boards..."</p> }>
                    {move || {
                        boards
                            .get()
                            .map(|list| {
                                view! {
                                    <div class="dashboard-page__cards">
                                        {list
                                            .into_iter()
                                            .map(|b| {
                                                view! {
                                                    <BoardCard
                                                        id=b.id
                                                        name=b.name
                                                        is_public=b.is_public
                                                        collaborator_count=b.collaborator_count
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                            })
                    }}
                </Suspense>
            </div>

            <Show when=move || show_create.get()>
                <CreateBoardDialog
                    name=new_board_name
                    is_public=new_board_public
                    on_cancel=on_cancel
                    boards=boards
                />
            </Show>
        </div>
    }
}

/// Modal dialog for creating a new board.
#[component]
fn CreateBoardDialog(
    name: RwSignal<String>,
    is_public: RwSignal<bool>,
    on_cancel: Callback<()>,
    boards: LocalResource<Vec<BoardListItem>>,
) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();
    let notices = expect_context::<RwSignal<crate::state::notices::NoticeState>>();

    let submit = Callback::new(move |()| {
        let board_name = name.get();
        if board_name.trim().is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let board_name = board_name.trim().to_owned();
            let make_public = is_public.get();
            let navigate = navigate.clone();
            let boards = boards.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_board(&board_name, make_public).await {
                    Ok(board) => {
                        boards.refetch();
                        navigate(&format!("/board/{}", board.id), NavigateOptions::default());
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
            let _ = board_name;
            let _ = &boards;
            let _ = (&notices, is_public.get());
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Create Board"</h2>
                <label class="dialog__label">
                    "Board Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            name.set(event_target_value(&ev));
                        }
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <label class="dialog__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || is_public.get()
                        on:change=move |ev| is_public.set(event_target_checked(&ev))
                    />
                    "Public board"
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
