//! Block event handlers extracted from `event_client`.
//!
//! Remote events are applied unconditionally through the same store
//! primitives as local mutations. There is no own-echo detection: re-applying
//! an upsert or patch with identical values is a no-op in effect, so echoes
//! of this client's confirmed writes are harmless. Malformed events (missing
//! identifier, unparsable record) are dropped silently; another
//! participant's bug must not crash this canvas.

#[cfg(test)]
#[path = "event_client_blocks_test.rs"]
mod event_client_blocks_test;

use events::{BlockEvent, Envelope};

use crate::net::envelope::{parse_block_record, parse_position, pick_str};
use crate::state::blocks::BlockStore;

/// Payload keys accepted as the block identifier of delete/move events.
const ID_KEYS: [&str; 3] = ["blockId", "_id", "id"];

/// Apply one channel event to the block store.
///
/// Returns `true` when the envelope named one of the four block events,
/// whether or not its payload was usable.
pub fn apply_block_event(envelope: &Envelope, store: &mut BlockStore) -> bool {
    let Some(event) = BlockEvent::from_name(&envelope.event) else {
        return false;
    };

    match event {
        BlockEvent::Created | BlockEvent::Updated => {
            if let Some(block) = parse_block_record(&envelope.data) {
                store.upsert(block);
            }
        }
        BlockEvent::Deleted => {
            if let Some(id) = pick_str(&envelope.data, &ID_KEYS) {
                store.remove(id);
            }
        }
        BlockEvent::Moved => {
            if let Some(id) = pick_str(&envelope.data, &ID_KEYS) {
                let position = envelope
                    .data
                    .get("position")
                    .map_or_else(Default::default, parse_position);
                store.patch_position(id, position);
            }
        }
    }
    true
}

/// True when an envelope belongs to the board this client has open.
///
/// Room scoping means the server should only deliver our board's events, but
/// a stale envelope racing a board switch must not leak into the new store.
#[must_use]
pub fn event_targets_board(envelope: &Envelope, current_board: Option<&str>) -> bool {
    match (&envelope.board_id, current_board) {
        (Some(event_board), Some(current)) => event_board == current,
        // Envelopes without a board id predate room scoping; accept them.
        (None, Some(_)) => true,
        (_, None) => false,
    }
}
