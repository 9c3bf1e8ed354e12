//! WebSocket event client for the realtime board channel.
//!
//! Manages the channel lifecycle: connect, reconnect with exponential
//! backoff, envelope decode, and dispatch into board state. All socket logic
//! is gated behind `#[cfg(feature = "hydrate")]` since it requires a browser
//! environment; the pure per-event appliers live in
//! [`super::event_client_blocks`].
//!
//! ERROR HANDLING
//! ==============
//! Transport and decode failures never propagate: they are logged, the
//! connection status flips to disconnected, and the reconnect loop takes
//! over. Missed events are not replayed; the board page re-fetches the full
//! board whenever `connection_epoch` advances.

#[cfg(feature = "hydrate")]
use events::Envelope;
#[cfg(feature = "hydrate")]
use leptos::prelude::{GetUntracked, RwSignal, Update};

#[cfg(feature = "hydrate")]
use crate::net::event_client_blocks;
#[cfg(feature = "hydrate")]
use crate::state::blocks::BlockStore;
#[cfg(feature = "hydrate")]
use crate::state::board::{BoardState, ConnectionStatus};

/// Spawn the channel client lifecycle as a local async task.
///
/// Returns the sender used to emit envelopes; it survives reconnects.
#[cfg(feature = "hydrate")]
pub fn spawn_event_client(
    board: RwSignal<BoardState>,
    blocks: RwSignal<BlockStore>,
) -> futures::channel::mpsc::UnboundedSender<Vec<u8>> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<Vec<u8>>();
    leptos::task::spawn_local(event_client_loop(board, blocks, rx));
    tx
}

/// Main connection loop with reconnect backoff.
#[cfg(feature = "hydrate")]
async fn event_client_loop(
    board: RwSignal<BoardState>,
    blocks: RwSignal<BlockStore>,
    rx: futures::channel::mpsc::UnboundedReceiver<Vec<u8>>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let rx = Rc::new(RefCell::new(rx));
    let mut backoff_ms: u32 = 1000;
    let max_backoff_ms: u32 = 10_000;

    loop {
        board.update(|b| b.connection_status = ConnectionStatus::Connecting);

        match connect_and_run(&channel_url(), board, blocks, &rx).await {
            Ok(()) => leptos::logging::log!("channel disconnected cleanly"),
            Err(e) => leptos::logging::warn!("channel error: {e}"),
        }

        board.update(|b| b.connection_status = ConnectionStatus::Disconnected);

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(max_backoff_ms);
    }
}

/// Channel endpoint derived from the page location, with the session token
/// carried as a query parameter.
#[cfg(feature = "hydrate")]
fn channel_url() -> String {
    let location = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let ws_proto = if location.starts_with("https") { "wss" } else { "ws" };
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let token = crate::util::auth::stored_token().unwrap_or_default();
    format!("{ws_proto}://{host}/api/ws?token={token}")
}

/// Connect and process envelopes until disconnect.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    board: RwSignal<BoardState>,
    blocks: RwSignal<BlockStore>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<Vec<u8>>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    board.update(|b| {
        b.connection_status = ConnectionStatus::Connected;
        // Each epoch triggers a room re-join and a full board resync.
        b.connection_epoch += 1;
    });

    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(msg) = rx_borrow.next().await {
            if ws_write.send(Message::Bytes(msg)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Bytes(bytes)) => match events::decode_envelope(&bytes) {
                    Ok(envelope) => dispatch_envelope(&envelope, board, blocks),
                    Err(e) => leptos::logging::warn!("undecodable envelope: {e}"),
                },
                Ok(Message::Text(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("channel recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// Route one incoming envelope to the block store.
#[cfg(feature = "hydrate")]
fn dispatch_envelope(
    envelope: &Envelope,
    board: RwSignal<BoardState>,
    blocks: RwSignal<BlockStore>,
) {
    if envelope.event == events::ROOM_JOINED {
        leptos::logging::log!(
            "joined room {}",
            envelope.board_id.as_deref().unwrap_or("<none>")
        );
        return;
    }

    if events::BlockEvent::from_name(&envelope.event).is_some() {
        let current = board.get_untracked().board_id;
        if !event_client_blocks::event_targets_board(envelope, current.as_deref()) {
            // Stale envelope racing a board switch; drop it.
            return;
        }
        blocks.update(|store| {
            event_client_blocks::apply_block_event(envelope, store);
        });
    }
}
