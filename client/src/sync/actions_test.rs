use super::*;
use crate::net::envelope::normalize_block_response;
use crate::net::event_client_blocks::apply_block_event;
use crate::net::types::BlockKind;
use crate::state::notices::NoticeLevel;

fn block(id: &str, x: f64, y: f64) -> Block {
    Block {
        id: id.to_owned(),
        kind: BlockKind::Text,
        content: "note".to_owned(),
        position: Position { x, y },
        width: None,
        height: None,
        board_id: Some("board-1".to_owned()),
        created_by: None,
        last_edited: None,
    }
}

fn moved_envelope(id: &str, x: f64, y: f64) -> events::Envelope {
    events::Envelope {
        id: "env-1".to_owned(),
        ts: 0,
        board_id: Some("board-1".to_owned()),
        from: Some("peer".to_owned()),
        event: events::BLOCK_MOVED.to_owned(),
        data: serde_json::json!({"blockId": id, "position": {"x": x, "y": y}}),
    }
}

struct Fixture {
    store: BlockStore,
    pending: PendingSet,
    notices: NoticeState,
}

fn fixture_with(blocks: Vec<Block>) -> Fixture {
    let mut store = BlockStore::default();
    store.replace_all(blocks);
    Fixture {
        store,
        pending: PendingSet::default(),
        notices: NoticeState::default(),
    }
}

// =============================================================
// move: optimistic apply + settle
// =============================================================

#[test]
fn begin_move_applies_position_immediately() {
    let mut f = fixture_with(vec![block("b1", 10.0, 10.0)]);
    begin_move(&mut f.store, &mut f.pending, "b1", Position { x: 50.0, y: 50.0 }, None);

    assert_eq!(f.store.get("b1").map(|b| b.position), Some(Position { x: 50.0, y: 50.0 }));
    assert_eq!(f.pending.state_of("b1"), OpState::OptimisticPending);
}

#[test]
fn confirmed_move_overwrites_with_authoritative_block() {
    let mut f = fixture_with(vec![block("b1", 10.0, 10.0)]);
    let snap = begin_move(&mut f.store, &mut f.pending, "b1", Position { x: 50.4, y: 50.6 }, None);

    // Server rounds coordinates; its record wins over the optimistic guess.
    let state = settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Ok(block("b1", 50.0, 51.0)),
    );

    assert_eq!(state, OpState::Confirmed);
    assert_eq!(f.store.get("b1").map(|b| b.position), Some(Position { x: 50.0, y: 51.0 }));
    assert!(f.pending.is_empty());
    assert_eq!(f.notices.error_count(), 0);
}

#[test]
fn failed_move_restores_exact_pre_mutation_snapshot() {
    let mut f = fixture_with(vec![block("b1", 10.0, 10.0), block("b2", 0.0, 0.0)]);
    let before = f.store.clone();
    let snap = begin_move(&mut f.store, &mut f.pending, "b1", Position { x: 50.0, y: 50.0 }, None);

    let state = settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Err(MOVE_FAILED.to_owned()),
    );

    assert_eq!(state, OpState::Failed);
    assert_eq!(f.store, before);
    assert_eq!(f.notices.error_count(), 1);
    assert_eq!(f.pending.state_of("b1"), OpState::Idle);
}

#[test]
fn failed_move_rolls_back_even_with_no_other_field_changes() {
    // A block whose only difference from the snapshot is the position itself.
    let mut f = fixture_with(vec![block("b1", 1.0, 2.0)]);
    let before = f.store.clone();
    let snap = begin_move(&mut f.store, &mut f.pending, "b1", Position { x: 3.0, y: 4.0 }, None);

    settle_mutation(&mut f.store, &mut f.pending, &mut f.notices, "b1", snap, Err("no".to_owned()));
    assert_eq!(f.store, before);
}

#[test]
fn drag_preview_then_begin_move_rolls_back_to_pre_drag_state() {
    let mut f = fixture_with(vec![block("b1", 10.0, 10.0)]);
    let before = f.store.clone();

    // Pointer-down captures the snapshot; pointer-move previews positions.
    let drag_snapshot = f.store.snapshot();
    preview_move(&mut f.store, "b1", Position { x: 20.0, y: 20.0 });
    preview_move(&mut f.store, "b1", Position { x: 42.0, y: 37.0 });

    // Release opens the mutation with the pre-drag snapshot.
    let snap = begin_move(
        &mut f.store,
        &mut f.pending,
        "b1",
        Position { x: 42.0, y: 37.0 },
        Some(drag_snapshot),
    );
    settle_mutation(&mut f.store, &mut f.pending, &mut f.notices, "b1", snap, Err("down".to_owned()));

    assert_eq!(f.store, before);
}

// =============================================================
// edit: optimistic apply + settle
// =============================================================

#[test]
fn begin_edit_patches_content_immediately() {
    let mut f = fixture_with(vec![block("b1", 0.0, 0.0)]);
    begin_edit(&mut f.store, &mut f.pending, "b1", "rewritten");

    assert_eq!(f.store.get("b1").map(|b| b.content.as_str()), Some("rewritten"));
    assert_eq!(f.pending.kind_of("b1"), Some(OpKind::Edit));
}

#[test]
fn confirmed_edit_reconciles_to_server_record() {
    let mut f = fixture_with(vec![block("b1", 0.0, 0.0)]);
    let snap = begin_edit(&mut f.store, &mut f.pending, "b1", "draft");

    let mut authoritative = block("b1", 0.0, 0.0);
    authoritative.content = "draft".to_owned();
    authoritative.last_edited = Some("2025-03-01T12:00:00Z".to_owned());
    let state = settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Ok(authoritative.clone()),
    );

    assert_eq!(state, OpState::Confirmed);
    assert_eq!(f.store.get("b1"), Some(&authoritative));
}

#[test]
fn failed_edit_restores_snapshot_and_notifies_once() {
    let mut f = fixture_with(vec![block("b1", 0.0, 0.0)]);
    let before = f.store.clone();
    let snap = begin_edit(&mut f.store, &mut f.pending, "b1", "draft");

    settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Err("Content too long".to_owned()),
    );

    assert_eq!(f.store, before);
    assert_eq!(f.notices.items.len(), 1);
    assert_eq!(f.notices.items[0].level, NoticeLevel::Error);
    // Validation messages surface verbatim.
    assert_eq!(f.notices.items[0].message, "Content too long");
}

#[test]
fn settled_mutation_with_invalid_server_record_counts_as_failure() {
    let mut f = fixture_with(vec![block("b1", 0.0, 0.0)]);
    let before = f.store.clone();
    let snap = begin_edit(&mut f.store, &mut f.pending, "b1", "draft");

    let state = settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Ok(block("", 0.0, 0.0)),
    );

    assert_eq!(state, OpState::Failed);
    assert_eq!(f.store, before);
    assert_eq!(f.notices.error_count(), 1);
}

// =============================================================
// create: no optimistic insert
// =============================================================

#[test]
fn create_inserts_nothing_before_settle() {
    let mut f = fixture_with(vec![]);
    begin_create(&mut f.pending, "create:tmp-1");

    assert!(f.store.is_empty());
    assert_eq!(f.pending.state_of("create:tmp-1"), OpState::OptimisticPending);
}

#[test]
fn confirmed_create_inserts_normalized_block() {
    let mut f = fixture_with(vec![]);
    begin_create(&mut f.pending, "create:tmp-1");

    // The exact envelope shape from the backing service.
    let payload = serde_json::json!({
        "data": {"_id": "abc", "type": "text", "content": "hello", "position": {"x": 0.0, "y": 0.0}}
    });
    let normalized = normalize_block_response(&payload).ok_or_else(|| CREATE_FAILED.to_owned());
    let state = settle_create(&mut f.store, &mut f.pending, &mut f.notices, "create:tmp-1", normalized);

    assert_eq!(state, OpState::Confirmed);
    assert_eq!(f.store.len(), 1);
    let stored = f.store.get("abc").expect("block");
    assert_eq!(stored.content, "hello");
    assert_eq!(stored.position, Position { x: 0.0, y: 0.0 });
}

#[test]
fn create_with_unnormalizable_response_inserts_nothing_and_reports_failure() {
    let mut f = fixture_with(vec![]);
    begin_create(&mut f.pending, "create:tmp-1");

    // Transport succeeded, but no strategy yields a block with a valid id.
    let payload = serde_json::json!({"ok": true, "data": {"type": "text"}});
    let normalized = normalize_block_response(&payload).ok_or_else(|| CREATE_FAILED.to_owned());
    let state = settle_create(&mut f.store, &mut f.pending, &mut f.notices, "create:tmp-1", normalized);

    assert_eq!(state, OpState::Failed);
    assert!(f.store.is_empty());
    assert_eq!(f.notices.error_count(), 1);
    assert_eq!(f.pending.state_of("create:tmp-1"), OpState::Idle);
}

#[test]
fn failed_create_leaves_existing_blocks_untouched() {
    let mut f = fixture_with(vec![block("b1", 1.0, 1.0)]);
    let before = f.store.clone();
    begin_create(&mut f.pending, "create:tmp-2");

    settle_create(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "create:tmp-2",
        Err(CREATE_FAILED.to_owned()),
    );

    assert_eq!(f.store, before);
}

// =============================================================
// delete: confirm-then-remove
// =============================================================

#[test]
fn delete_keeps_block_until_confirmation() {
    let mut f = fixture_with(vec![block("b2", 0.0, 0.0)]);
    begin_delete(&mut f.pending, "b2");

    assert!(f.store.contains("b2"));
    assert_eq!(f.pending.kind_of("b2"), Some(OpKind::Delete));
}

#[test]
fn confirmed_delete_removes_block() {
    let mut f = fixture_with(vec![block("b2", 0.0, 0.0)]);
    begin_delete(&mut f.pending, "b2");

    let state = settle_delete(&mut f.store, &mut f.pending, &mut f.notices, "b2", Ok(()));

    assert_eq!(state, OpState::Confirmed);
    assert!(!f.store.contains("b2"));
}

#[test]
fn timed_out_delete_leaves_block_present_with_one_notice() {
    let mut f = fixture_with(vec![block("b2", 0.0, 0.0)]);
    begin_delete(&mut f.pending, "b2");

    let state = settle_delete(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b2",
        Err(DELETE_FAILED.to_owned()),
    );

    assert_eq!(state, OpState::Failed);
    assert!(f.store.contains("b2"));
    assert_eq!(f.notices.error_count(), 1);
    assert_eq!(f.pending.state_of("b2"), OpState::Idle);
}

// =============================================================
// interleaving with remote events: last arrival wins
// =============================================================

#[test]
fn remote_move_after_rest_confirmation_wins() {
    let mut f = fixture_with(vec![block("B1", 10.0, 10.0)]);
    let snap = begin_move(&mut f.store, &mut f.pending, "B1", Position { x: 50.0, y: 50.0 }, None);

    // REST confirmation arrives first…
    settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "B1",
        snap,
        Ok(block("B1", 50.0, 50.0)),
    );
    // …then the remote event for another user's move.
    apply_block_event(&moved_envelope("B1", 60.0, 60.0), &mut f.store);

    assert_eq!(f.store.get("B1").map(|b| b.position), Some(Position { x: 60.0, y: 60.0 }));
}

#[test]
fn rest_confirmation_after_remote_move_wins() {
    let mut f = fixture_with(vec![block("B1", 10.0, 10.0)]);
    let snap = begin_move(&mut f.store, &mut f.pending, "B1", Position { x: 50.0, y: 50.0 }, None);

    // The remote event lands while the REST call is still in flight…
    apply_block_event(&moved_envelope("B1", 60.0, 60.0), &mut f.store);
    assert_eq!(f.store.get("B1").map(|b| b.position), Some(Position { x: 60.0, y: 60.0 }));

    // …and the later-arriving REST confirmation overwrites it.
    settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "B1",
        snap,
        Ok(block("B1", 50.0, 50.0)),
    );

    assert_eq!(f.store.get("B1").map(|b| b.position), Some(Position { x: 50.0, y: 50.0 }));
}

#[test]
fn failed_move_rollback_also_discards_interleaved_remote_move() {
    // Known race, kept deliberately: rollback restores the full pre-mutation
    // snapshot, so a remote move that arrived mid-flight is lost until the
    // next event or resync.
    let mut f = fixture_with(vec![block("B1", 10.0, 10.0)]);
    let before = f.store.clone();
    let snap = begin_move(&mut f.store, &mut f.pending, "B1", Position { x: 50.0, y: 50.0 }, None);

    apply_block_event(&moved_envelope("B1", 60.0, 60.0), &mut f.store);
    settle_mutation(&mut f.store, &mut f.pending, &mut f.notices, "B1", snap, Err("nope".to_owned()));

    assert_eq!(f.store, before);
}

#[test]
fn echo_of_own_confirmed_update_is_a_noop() {
    let mut f = fixture_with(vec![block("b1", 0.0, 0.0)]);
    let snap = begin_edit(&mut f.store, &mut f.pending, "b1", "hello");
    let mut authoritative = block("b1", 0.0, 0.0);
    authoritative.content = "hello".to_owned();
    settle_mutation(
        &mut f.store,
        &mut f.pending,
        &mut f.notices,
        "b1",
        snap,
        Ok(authoritative.clone()),
    );
    let after_confirm = f.store.clone();

    // The channel echoes our own emit back at us with identical values.
    let echo = events::Envelope {
        id: "env-echo".to_owned(),
        ts: 0,
        board_id: Some("board-1".to_owned()),
        from: Some("me".to_owned()),
        event: events::BLOCK_UPDATED.to_owned(),
        data: serde_json::to_value(&authoritative).expect("serialize"),
    };
    apply_block_event(&echo, &mut f.store);

    assert_eq!(f.store, after_confirm);
}
