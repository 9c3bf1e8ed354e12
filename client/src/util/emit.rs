//! Envelope construction and emission for confirmed mutations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only mutations the server has already confirmed are broadcast, always with
//! the authoritative record, so peers never see a value this client could
//! still roll back. Builders are separated from the send wrappers to keep
//! payload shapes testable without a socket.

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;

use events::Envelope;

use crate::app::EventSender;
use crate::net::types::Block;

fn envelope(event: &str, board_id: Option<String>, data: serde_json::Value) -> Envelope {
    Envelope {
        id: uuid::Uuid::new_v4().to_string(),
        ts: 0,
        board_id,
        from: None,
        event: event.to_owned(),
        data,
    }
}

/// Build a `block-created` envelope carrying the full confirmed block.
#[must_use]
pub fn block_created_envelope(block: &Block) -> Envelope {
    envelope(
        events::BLOCK_CREATED,
        block.board_id.clone(),
        serde_json::to_value(block).unwrap_or_default(),
    )
}

/// Build a `block-updated` envelope carrying the full confirmed block.
#[must_use]
pub fn block_updated_envelope(block: &Block) -> Envelope {
    envelope(
        events::BLOCK_UPDATED,
        block.board_id.clone(),
        serde_json::to_value(block).unwrap_or_default(),
    )
}

/// Build a `block-moved` envelope carrying only the id and new position.
#[must_use]
pub fn block_moved_envelope(block: &Block) -> Envelope {
    envelope(
        events::BLOCK_MOVED,
        block.board_id.clone(),
        serde_json::json!({
            "blockId": block.id,
            "position": {"x": block.position.x, "y": block.position.y},
        }),
    )
}

/// Build a `block-deleted` envelope carrying only the id.
#[must_use]
pub fn block_deleted_envelope(board_id: Option<String>, id: &str) -> Envelope {
    envelope(
        events::BLOCK_DELETED,
        board_id,
        serde_json::json!({"blockId": id}),
    )
}

/// Build a room join request for a board.
#[must_use]
pub fn room_join_envelope(board_id: &str) -> Envelope {
    envelope(events::ROOM_JOIN, Some(board_id.to_owned()), serde_json::json!({}))
}

/// Build a room leave request for a board.
#[must_use]
pub fn room_leave_envelope(board_id: &str) -> Envelope {
    envelope(events::ROOM_LEAVE, Some(board_id.to_owned()), serde_json::json!({}))
}

/// Emit a confirmed create to the channel.
pub fn send_block_created(sender: &EventSender, block: &Block) {
    let _ = sender.send(&block_created_envelope(block));
}

/// Emit a confirmed update to the channel.
pub fn send_block_updated(sender: &EventSender, block: &Block) {
    let _ = sender.send(&block_updated_envelope(block));
}

/// Emit a confirmed move to the channel.
pub fn send_block_moved(sender: &EventSender, block: &Block) {
    let _ = sender.send(&block_moved_envelope(block));
}

/// Emit a confirmed delete to the channel.
pub fn send_block_deleted(sender: &EventSender, board_id: Option<String>, id: &str) {
    let _ = sender.send(&block_deleted_envelope(board_id, id));
}
