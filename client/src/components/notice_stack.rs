//! Transient notice stack rendered above everything else.

use leptos::prelude::*;

use crate::state::notices::{Notice, NoticeLevel, NoticeState};

/// Floating stack of transient notices; newest at the bottom. Notices
/// dismiss themselves after a short delay or on click.
#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-stack">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice| view! { <NoticeRow notice=notice/> }
            />
        </div>
    }
}

#[component]
fn NoticeRow(notice: Notice) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let id = notice.id;

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(4000)).await;
        notices.update(|n| n.dismiss(id));
    });

    let level_class = match notice.level {
        NoticeLevel::Info => "notice notice--info",
        NoticeLevel::Success => "notice notice--success",
        NoticeLevel::Error => "notice notice--error",
    };

    view! {
        <div class=level_class role="status" on:click=move |_| notices.update(|n| n.dismiss(id))>
            {notice.message}
        </div>
    }
}
