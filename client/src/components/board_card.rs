//! Card component for board list items on the dashboard.

use leptos::prelude::*;

/// A clickable card linking to one board.
#[component]
pub fn BoardCard(
    id: String,
    name: String,
    #[prop(optional)] is_public: bool,
    #[prop(optional)] collaborator_count: usize,
) -> impl IntoView {
    let href = format!("/board/{id}");

    view! {
        <a class="board-card" href=href>
            <span class="board-card__name">{name}</span>
            <span class="board-card__meta">
                <Show when=move || is_public>
                    <span class="board-card__badge">"public"</span>
                </Show>
                <span class="board-card__members">
                    {format!(
                        "{} member{}",
                        collaborator_count + 1,
                        if collaborator_count == 0 { "" } else { "s" },
                    )}
                </span>
            </span>
        </a>
    }
}
