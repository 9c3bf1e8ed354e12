//! Async drivers for the reconciliation controller.
//!
//! Each driver runs one local mutation end to end: open it through the pure
//! core, suspend on the network call, then settle inside a single
//! run-to-completion update so the canvas never observes a half-applied
//! state. Confirmed mutations are echoed onto the realtime channel so other
//! participants converge.

use leptos::prelude::RwSignal;

use crate::app::EventSender;
use crate::state::blocks::BlockStore;
use crate::state::notices::NoticeState;
use crate::sync::pending::PendingSet;

#[cfg(feature = "hydrate")]
use crate::net::api::{self, CreateBlockDraft, UpdateBlockPatch};
#[cfg(feature = "hydrate")]
use crate::net::types::Position;
#[cfg(feature = "hydrate")]
use crate::state::blocks::Snapshot;
#[cfg(feature = "hydrate")]
use crate::sync::actions;
#[cfg(feature = "hydrate")]
use crate::util::emit;

/// Signal bundle the controller mutates. Provided once as Leptos context and
/// copied into every gesture handler.
#[derive(Clone, Copy)]
pub struct SyncContext {
    pub blocks: RwSignal<BlockStore>,
    pub pending: RwSignal<PendingSet>,
    pub notices: RwSignal<NoticeState>,
    pub sender: RwSignal<EventSender>,
}

/// Create a block: no optimistic insert, REST first, then store + channel.
#[cfg(feature = "hydrate")]
pub fn spawn_create_block(cx: SyncContext, draft: CreateBlockDraft) {
    use leptos::prelude::{GetUntracked, Update};

    let key = format!("create:{}", uuid::Uuid::new_v4());
    cx.pending.update(|pending| actions::begin_create(pending, &key));

    leptos::task::spawn_local(async move {
        let outcome = api::create_block(&draft).await;
        let confirmed = outcome.as_ref().ok().cloned();

        cx.blocks.update(|store| {
            cx.pending.update(|pending| {
                cx.notices.update(|notices| {
                    actions::settle_create(store, pending, notices, &key, outcome);
                });
            });
        });

        if let Some(block) = confirmed {
            emit::send_block_created(&cx.sender.get_untracked(), &block);
        }
    });
}

/// Move a block: optimistic position, REST confirm, rollback on failure.
///
/// `drag_snapshot` carries the store state captured on pointer-down when the
/// gesture already previewed positions; `None` snapshots here.
#[cfg(feature = "hydrate")]
pub fn spawn_move_block(
    cx: SyncContext,
    id: String,
    position: Position,
    drag_snapshot: Option<Snapshot>,
) {
    use leptos::prelude::{GetUntracked, Update};

    let mut snapshot = Snapshot::default();
    cx.blocks.update(|store| {
        cx.pending.update(|pending| {
            snapshot = actions::begin_move(store, pending, &id, position, drag_snapshot);
        });
    });

    leptos::task::spawn_local(async move {
        // Surface a move-specific message when the server had nothing to say.
        let outcome = api::update_block(&id, &UpdateBlockPatch::position(position))
            .await
            .map_err(|message| {
                if message == actions::UPDATE_FAILED {
                    actions::MOVE_FAILED.to_owned()
                } else {
                    message
                }
            });
        let confirmed = outcome.as_ref().ok().cloned();

        cx.blocks.update(|store| {
            cx.pending.update(|pending| {
                cx.notices.update(|notices| {
                    actions::settle_mutation(store, pending, notices, &id, snapshot, outcome);
                });
            });
        });

        if let Some(block) = confirmed {
            emit::send_block_moved(&cx.sender.get_untracked(), &block);
        }
    });
}

/// Edit a block's content: optimistic patch, REST confirm, rollback on
/// failure.
#[cfg(feature = "hydrate")]
pub fn spawn_edit_block(cx: SyncContext, id: String, content: String) {
    use leptos::prelude::{GetUntracked, Update};

    let mut snapshot = Snapshot::default();
    cx.blocks.update(|store| {
        cx.pending.update(|pending| {
            snapshot = actions::begin_edit(store, pending, &id, &content);
        });
    });

    leptos::task::spawn_local(async move {
        let outcome = api::update_block(&id, &UpdateBlockPatch::content(content)).await;
        let confirmed = outcome.as_ref().ok().cloned();

        cx.blocks.update(|store| {
            cx.pending.update(|pending| {
                cx.notices.update(|notices| {
                    actions::settle_mutation(store, pending, notices, &id, snapshot, outcome);
                });
            });
        });

        if let Some(block) = confirmed {
            emit::send_block_updated(&cx.sender.get_untracked(), &block);
        }
    });
}

/// Delete a block: the record stays visible until the server confirms.
#[cfg(feature = "hydrate")]
pub fn spawn_delete_block(cx: SyncContext, id: String) {
    use leptos::prelude::{GetUntracked, Update};

    let board_id = cx
        .blocks
        .get_untracked()
        .get(&id)
        .and_then(|b| b.board_id.clone());
    cx.pending.update(|pending| actions::begin_delete(pending, &id));

    leptos::task::spawn_local(async move {
        let outcome = api::delete_block(&id).await;
        let succeeded = outcome.is_ok();

        cx.blocks.update(|store| {
            cx.pending.update(|pending| {
                cx.notices.update(|notices| {
                    actions::settle_delete(store, pending, notices, &id, outcome);
                });
            });
        });

        if succeeded {
            emit::send_block_deleted(&cx.sender.get_untracked(), board_id, &id);
        }
    });
}
