//! Pure mutation core of the reconciliation controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every local mutation runs through a begin/settle pair: `begin_*` captures
//! a verbatim store snapshot, applies the optimistic change, and registers
//! the in-flight entry; `settle_*` reconciles the authoritative result or
//! restores the snapshot. The async drivers in [`super::controller`] only
//! thread network results into these functions, so the entire rollback and
//! reconciliation discipline is testable without a browser.
//!
//! Ordering is strictly arrival order: these functions apply whatever they
//! are handed, whenever they are handed it. A remote event landing between a
//! begin and its settle is simply another store mutation; the later arrival
//! wins.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use crate::net::types::{Block, Position};
use crate::state::blocks::{BlockStore, Snapshot};
use crate::state::notices::NoticeState;
use crate::sync::pending::{OpKind, OpState, PendingSet};

/// Fallback failure message when the server offers nothing more specific.
pub const CREATE_FAILED: &str = "Failed to create block";
pub const UPDATE_FAILED: &str = "Failed to update block";
pub const MOVE_FAILED: &str = "Failed to move block";
pub const DELETE_FAILED: &str = "Failed to delete block";

/// Result of one settled remote command: a normalized authoritative block, or
/// the user-facing failure message.
pub type CommandOutcome = Result<Block, String>;

/// Apply in-progress drag feedback without opening a mutation.
///
/// Used on every pointer-move sample while a drag is live; the pending entry
/// and snapshot are owned by the drag gesture and settled on release.
pub fn preview_move(store: &mut BlockStore, id: &str, position: Position) -> bool {
    store.patch_position(id, position)
}

/// Open a move mutation: snapshot, optimistic position patch, pending entry.
///
/// A drag gesture that already previewed positions passes the snapshot it
/// captured on pointer-down so the rollback target predates the preview
/// patches; a programmatic move passes `None` and the snapshot is taken here.
pub fn begin_move(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    id: &str,
    position: Position,
    snapshot: Option<Snapshot>,
) -> Snapshot {
    let snapshot = snapshot.unwrap_or_else(|| store.snapshot());
    pending.begin(id, OpKind::Move);
    store.patch_position(id, position);
    snapshot
}

/// Open an edit mutation: snapshot, optimistic content patch, pending entry.
pub fn begin_edit(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    id: &str,
    content: &str,
) -> Snapshot {
    let snapshot = store.snapshot();
    pending.begin(id, OpKind::Edit);
    store.patch_content(id, content);
    snapshot
}

/// Open a create mutation under a client-side correlation key.
///
/// Creates apply nothing optimistically: no server id exists yet, and a ghost
/// block that normalization later rejects could never be cleaned up reliably.
pub fn begin_create(pending: &mut PendingSet, correlation_key: &str) {
    pending.begin(correlation_key, OpKind::Create);
}

/// Open a delete mutation. The block stays in the store until the server
/// confirms, so a failed delete never needs to resurrect anything.
pub fn begin_delete(pending: &mut PendingSet, id: &str) {
    pending.begin(id, OpKind::Delete);
}

/// Settle a move or edit mutation.
///
/// Success overwrites the optimistic guess with the authoritative block
/// (server-side clamping and derived fields included). Failure restores the
/// pre-mutation snapshot of the whole store, not just the one field, and
/// records exactly one notice.
pub fn settle_mutation(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    notices: &mut NoticeState,
    id: &str,
    snapshot: Snapshot,
    outcome: CommandOutcome,
) -> OpState {
    match outcome {
        Ok(block) if block.has_valid_id() => {
            store.upsert(block);
            pending.settle(id, true)
        }
        Ok(_) => fail_mutation(store, pending, notices, id, snapshot, UPDATE_FAILED),
        Err(message) => fail_mutation(store, pending, notices, id, snapshot, &message),
    }
}

fn fail_mutation(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    notices: &mut NoticeState,
    id: &str,
    snapshot: Snapshot,
    message: &str,
) -> OpState {
    store.restore(snapshot);
    notices.error(message);
    pending.settle(id, false)
}

/// Settle a create mutation.
///
/// Only a normalized block with a usable id is ever inserted; anything else
/// leaves the store untouched and records one failure notice.
pub fn settle_create(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    notices: &mut NoticeState,
    correlation_key: &str,
    outcome: CommandOutcome,
) -> OpState {
    match outcome {
        Ok(block) if block.has_valid_id() => {
            store.upsert(block);
            notices.success("Block created!");
            pending.settle(correlation_key, true)
        }
        Ok(_) => {
            notices.error(CREATE_FAILED);
            pending.settle(correlation_key, false)
        }
        Err(message) => {
            notices.error(message);
            pending.settle(correlation_key, false)
        }
    }
}

/// Settle a delete mutation.
///
/// The removal happens here, on confirmation; a failure leaves the block in
/// place and records one notice.
pub fn settle_delete(
    store: &mut BlockStore,
    pending: &mut PendingSet,
    notices: &mut NoticeState,
    id: &str,
    outcome: Result<(), String>,
) -> OpState {
    match outcome {
        Ok(()) => {
            store.remove(id);
            notices.success("Block deleted!");
            pending.settle(id, true)
        }
        Err(message) => {
            notices.error(message);
            pending.settle(id, false)
        }
    }
}
