//! A single block on the canvas: kind-specific body, edit and delete
//! affordances, drag handle.

use leptos::prelude::*;

use crate::net::types::{Block, BlockKind};
use crate::sync::controller::SyncContext;

/// One positioned block. The parent re-renders this whenever the store
/// changes, so the props always reflect the current store record.
///
/// `on_drag_start` receives `(block id, pointer client x, client y)`.
#[component]
pub fn BlockView(
    block: Block,
    on_drag_start: Callback<(String, f64, f64)>,
) -> impl IntoView {
    let sync = expect_context::<SyncContext>();
    let pending = sync.pending;

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());

    let (width, height) = block.size();
    let style = format!(
        "left:{}px;top:{}px;width:{}px;min-height:{}px",
        block.position.x, block.position.y, width, height
    );
    let root_class = format!("block block--{}", block.kind.as_str());

    let id = block.id.clone();
    let busy_id = id.clone();
    let busy = move || pending.get().is_pending(&busy_id);

    let drag_id = id.clone();
    let on_pointerdown = move |ev: leptos::ev::PointerEvent| {
        if editing.get_untracked() {
            return;
        }
        ev.stop_propagation();
        on_drag_start.run((
            drag_id.clone(),
            f64::from(ev.client_x()),
            f64::from(ev.client_y()),
        ));
    };

    let editable = matches!(block.kind, BlockKind::Text | BlockKind::Link);
    let edit_content = block.content.clone();
    let on_dblclick = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if !editable {
            return;
        }
        draft.set(edit_content.clone());
        editing.set(true);
    };

    let commit_id = id.clone();
    let original_content = block.content.clone();
    let commit_edit = Callback::new(move |()| {
        if !editing.get_untracked() {
            return;
        }
        editing.set(false);
        let text = draft.get_untracked();
        if text == original_content {
            return;
        }
        #[cfg(feature = "hydrate")]
        crate::sync::controller::spawn_edit_block(sync, commit_id.clone(), text);
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&commit_id, text, &sync);
        }
    });

    let delete_id = id.clone();
    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        #[cfg(feature = "hydrate")]
        crate::sync::controller::spawn_delete_block(sync, delete_id.clone());
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&delete_id, &sync);
        }
    };

    let body_kind = block.kind;
    let body_content = block.content.clone();
    let body = move || {
        let content = body_content.clone();
        match body_kind {
            BlockKind::Text => view! {
                <p class="block__text">{content}</p>
            }
            .into_any(),
            BlockKind::Image => view! {
                <img class="block__image" src=content alt="Board image"/>
            }
            .into_any(),
            BlockKind::Link => view! {
                <a class="block__link" href=content.clone() target="_blank" rel="noreferrer">
                    {content.clone()}
                </a>
            }
            .into_any(),
        }
    };

    view! {
        <div
            class=root_class
            class:block--busy=busy
            style=style
            on:pointerdown=on_pointerdown
            on:click=move |ev: leptos::ev::MouseEvent| ev.stop_propagation()
            on:dblclick=on_dblclick
        >
            <div class="block__actions">
                <button class="block__action block__action--delete" title="Delete block" on:click=on_delete>
                    "✕"
                </button>
            </div>

            <span class="block__badge">{block.kind.as_str()}</span>

            <Show when=move || !editing.get()>{body.clone()}</Show>

            <Show when=move || editing.get()>
                <textarea
                    class="block__editor"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:blur=move |_| commit_edit.run(())
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            commit_edit.run(());
                        }
                        if ev.key() == "Escape" {
                            editing.set(false);
                        }
                    }
                    on:pointerdown=move |ev: leptos::ev::PointerEvent| ev.stop_propagation()
                ></textarea>
            </Show>
        </div>
    }
}
