//! Floating menu offering the three block kinds at a canvas position.

use leptos::prelude::*;

use crate::net::types::{BlockKind, Position};

/// Kind picker shown after an empty-canvas click.
#[component]
pub fn BlockTypeMenu(position: Position, on_select: Callback<BlockKind>) -> impl IntoView {
    let style = format!("left:{}px;top:{}px", position.x, position.y);

    let option = move |kind: BlockKind, label: &'static str, hint: &'static str| {
        view! {
            <button
                class="block-type-menu__option"
                on:click=move |ev: leptos::ev::MouseEvent| {
                    ev.stop_propagation();
                    on_select.run(kind);
                }
            >
                <span class="block-type-menu__label">{label}</span>
                <span class="block-type-menu__hint">{hint}</span>
            </button>
        }
    };

    view! {
        <div class="block-type-menu" style=style on:click=move |ev| ev.stop_propagation()>
            {option(BlockKind::Text, "Text", "A note you can edit in place")}
            {option(BlockKind::Image, "Image", "Upload a picture")}
            {option(BlockKind::Link, "Link", "A clickable URL")}
        </div>
    }
}
