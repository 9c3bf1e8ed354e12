//! Canvas presentation layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the block store and turns gestures into controller intents:
//! empty-canvas click → kind menu → create; pointer drag → preview + move;
//! block affordances → edit/delete. The canvas never writes to the store
//! directly: drag previews go through the controller's `preview_move` and
//! everything else through the spawn drivers.

use leptos::prelude::*;

use crate::components::block_type_menu::BlockTypeMenu;
use crate::components::block_view::BlockView;
use crate::net::types::{BlockKind, Position};
use crate::state::blocks::{BlockStore, Snapshot};
use crate::state::board::BoardState;
use crate::sync::actions;
use crate::sync::controller::SyncContext;

/// New blocks spawn centered on the click point, clamped into the canvas.
fn spawn_position(click: Position) -> Position {
    Position {
        x: (click.x - 100.0).max(0.0),
        y: (click.y - 75.0).max(0.0),
    }
}

/// Live drag gesture: which block, where it was grabbed, and the rollback
/// snapshot captured before the first preview patch.
#[derive(Clone, Debug)]
struct DragGesture {
    id: String,
    grab_dx: f64,
    grab_dy: f64,
    snapshot: Snapshot,
    last: Position,
    moved: bool,
}

/// The board canvas: block layer, creation menu, and hidden upload input.
#[component]
pub fn BoardCanvas() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let blocks = expect_context::<RwSignal<BlockStore>>();
    let notices = expect_context::<RwSignal<crate::state::notices::NoticeState>>();
    let sync = expect_context::<SyncContext>();

    let canvas_ref = NodeRef::<leptos::html::Div>::new();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();
    let drag = RwSignal::new(None::<DragGesture>);
    let menu_at = RwSignal::new(None::<Position>);
    let image_at = RwSignal::new(Position::default());
    // A click fired by releasing a drag must not open the creation menu.
    let suppress_click = RwSignal::new(false);

    // Pointer coordinates relative to the canvas origin.
    let canvas_point = move |client_x: f64, client_y: f64| -> Position {
        #[cfg(feature = "hydrate")]
        if let Some(el) = canvas_ref.get() {
            let rect = el.get_bounding_client_rect();
            return Position {
                x: client_x - rect.left(),
                y: client_y - rect.top(),
            };
        }
        Position {
            x: client_x,
            y: client_y,
        }
    };

    let on_drag_start = Callback::new(move |(id, client_x, client_y): (String, f64, f64)| {
        let Some(block) = blocks.get_untracked().get(&id).cloned() else {
            return;
        };
        let point = canvas_point(client_x, client_y);
        drag.set(Some(DragGesture {
            id,
            grab_dx: point.x - block.position.x,
            grab_dy: point.y - block.position.y,
            snapshot: blocks.get_untracked().snapshot(),
            last: block.position,
            moved: false,
        }));
    });

    let on_pointermove = move |ev: leptos::ev::PointerEvent| {
        let Some(mut gesture) = drag.get_untracked() else {
            return;
        };
        let point = canvas_point(f64::from(ev.client_x()), f64::from(ev.client_y()));
        let position = Position {
            x: (point.x - gesture.grab_dx).max(0.0),
            y: (point.y - gesture.grab_dy).max(0.0),
        };
        sync.blocks.update(|store| {
            actions::preview_move(store, &gesture.id, position);
        });
        gesture.last = position;
        gesture.moved = true;
        drag.set(Some(gesture));
    };

    let on_pointerup = move |_ev: leptos::ev::PointerEvent| {
        let Some(gesture) = drag.get_untracked() else {
            return;
        };
        drag.set(None);
        suppress_click.set(gesture.moved);
        if !gesture.moved {
            return;
        }

        #[cfg(feature = "hydrate")]
        crate::sync::controller::spawn_move_block(
            sync,
            gesture.id,
            gesture.last,
            Some(gesture.snapshot),
        );
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = gesture;
        }
    };

    let on_canvas_click = move |ev: leptos::ev::MouseEvent| {
        if suppress_click.get_untracked() {
            suppress_click.set(false);
            return;
        }
        if menu_at.get_untracked().is_some() {
            menu_at.set(None);
            return;
        }
        let point = canvas_point(f64::from(ev.client_x()), f64::from(ev.client_y()));
        menu_at.set(Some(point));
    };

    let on_select_kind = Callback::new(move |kind: BlockKind| {
        let Some(at) = menu_at.get_untracked() else {
            return;
        };
        menu_at.set(None);
        let position = spawn_position(at);

        if kind == BlockKind::Image {
            // Defer creation until the upload succeeds.
            image_at.set(position);
            #[cfg(feature = "hydrate")]
            if let Some(input) = file_input_ref.get() {
                input.click();
            }
            return;
        }

        let Some(board_id) = board.get_untracked().board_id else {
            return;
        };
        let content = match kind {
            BlockKind::Link => "https://example.com",
            _ => "Double-click to edit",
        };
        let draft = crate::net::api::CreateBlockDraft {
            kind,
            content: content.to_owned(),
            position,
            board_id,
            width: None,
            height: None,
        };
        #[cfg(feature = "hydrate")]
        crate::sync::controller::spawn_create_block(sync, draft);
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (draft, &sync);
        }
    });

    let on_file_chosen = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");

            let Some(board_id) = board.get_untracked().board_id else {
                return;
            };
            let position = image_at.get_untracked();
            leptos::task::spawn_local(async move {
                match crate::net::api::upload_image(&file).await {
                    Ok(url) => {
                        let draft = crate::net::api::CreateBlockDraft {
                            kind: BlockKind::Image,
                            content: url,
                            position,
                            board_id,
                            width: None,
                            height: None,
                        };
                        crate::sync::controller::spawn_create_block(sync, draft);
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
            let _ = (ev, &notices, &sync);
        }
    };

    view! {
        <div
            class="board-canvas"
            node_ref=canvas_ref
            tabindex="0"
            on:click=on_canvas_click
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                if ev.key() == "Escape" {
                    menu_at.set(None);
                }
            }
        >
            {move || {
                blocks
                    .get()
                    .ordered()
                    .into_iter()
                    .map(|block| view! { <BlockView block=block on_drag_start=on_drag_start/> })
                    .collect::<Vec<_>>()
            }}

            {move || {
                menu_at
                    .get()
                    .map(|at| view! { <BlockTypeMenu position=at on_select=on_select_kind/> })
            }}

            <input
                class="board-canvas__file-input"
                type="file"
                accept="image/*"
                node_ref=file_input_ref
                on:change=on_file_chosen
            />
        </div>
    }
}
