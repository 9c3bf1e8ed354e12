//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notice_stack::NoticeStack;
use crate::pages::{board::BoardPage, dashboard::DashboardPage, login::LoginPage};
use crate::state::auth::AuthState;
use crate::state::blocks::BlockStore;
use crate::state::board::BoardState;
use crate::state::boards::BoardsState;
use crate::state::invites::InviteState;
use crate::state::notices::NoticeState;
use crate::sync::controller::SyncContext;
use crate::sync::pending::PendingSet;

/// Handle for emitting envelopes to the realtime channel.
///
/// A default sender is installed before the channel client spawns; sends
/// before (or without) a live connection are dropped.
#[derive(Clone, Default)]
pub struct EventSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<Vec<u8>>>,
}

impl EventSender {
    #[cfg(feature = "hydrate")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue an envelope for the channel. Returns `false` when no connection
    /// task is attached or the channel has shut down.
    pub fn send(&self, envelope: &events::Envelope) -> bool {
        #[cfg(feature = "hydrate")]
        {
            match &self.tx {
                Some(tx) => tx.unbounded_send(events::encode_envelope(envelope)).is_ok(),
                None => false,
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = envelope;
            false
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, restores any persisted session,
/// spawns the realtime channel client, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let board = RwSignal::new(BoardState::default());
    let blocks = RwSignal::new(BlockStore::default());
    let boards = RwSignal::new(BoardsState::default());
    let invites = RwSignal::new(InviteState::default());
    let notices = RwSignal::new(NoticeState::default());
    let pending = RwSignal::new(PendingSet::default());
    let sender = RwSignal::new(EventSender::default());

    provide_context(auth);
    provide_context(board);
    provide_context(blocks);
    provide_context(boards);
    provide_context(invites);
    provide_context(notices);
    provide_context(pending);
    provide_context(sender);
    provide_context(SyncContext {
        blocks,
        pending,
        notices,
        sender,
    });

    #[cfg(feature = "hydrate")]
    {
        if let Some((user, token)) = crate::util::auth::load_session() {
            auth.update(|a| a.sign_in(user, token));
        }

        let tx = crate::net::event_client::spawn_event_client(board, blocks);
        sender.set(EventSender::new(tx));
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/ideaboard.css"/>
        <Title text="Ideaboard"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("board"), ParamSegment("id")) view=BoardPage/>
            </Routes>
        </Router>

        <NoticeStack/>
    }
}
