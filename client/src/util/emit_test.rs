use super::*;
use crate::net::types::{BlockKind, Position};

fn block() -> Block {
    Block {
        id: "b1".to_owned(),
        kind: BlockKind::Link,
        content: "https://example.com".to_owned(),
        position: Position { x: 12.0, y: 34.0 },
        width: Some(300.0),
        height: None,
        board_id: Some("board-1".to_owned()),
        created_by: Some("Ada".to_owned()),
        last_edited: None,
    }
}

#[test]
fn created_envelope_carries_full_block_payload() {
    let env = block_created_envelope(&block());

    assert_eq!(env.event, events::BLOCK_CREATED);
    assert_eq!(env.board_id.as_deref(), Some("board-1"));
    assert_eq!(env.data["_id"], "b1");
    assert_eq!(env.data["type"], "link");
    assert_eq!(env.data["content"], "https://example.com");
    assert_eq!(env.data["position"]["x"], 12.0);
}

#[test]
fn updated_envelope_carries_full_block_payload() {
    let env = block_updated_envelope(&block());
    assert_eq!(env.event, events::BLOCK_UPDATED);
    assert_eq!(env.data["_id"], "b1");
}

#[test]
fn moved_envelope_carries_only_id_and_position() {
    let env = block_moved_envelope(&block());

    assert_eq!(env.event, events::BLOCK_MOVED);
    assert_eq!(
        env.data,
        serde_json::json!({"blockId": "b1", "position": {"x": 12.0, "y": 34.0}})
    );
}

#[test]
fn deleted_envelope_carries_only_id() {
    let env = block_deleted_envelope(Some("board-1".to_owned()), "b1");

    assert_eq!(env.event, events::BLOCK_DELETED);
    assert_eq!(env.board_id.as_deref(), Some("board-1"));
    assert_eq!(env.data, serde_json::json!({"blockId": "b1"}));
}

#[test]
fn room_envelopes_are_scoped_by_board_id() {
    let join = room_join_envelope("board-1");
    assert_eq!(join.event, events::ROOM_JOIN);
    assert_eq!(join.board_id.as_deref(), Some("board-1"));
    assert_eq!(join.data, serde_json::json!({}));

    let leave = room_leave_envelope("board-1");
    assert_eq!(leave.event, events::ROOM_LEAVE);
    assert_eq!(leave.board_id.as_deref(), Some("board-1"));
}

#[test]
fn envelopes_get_fresh_ids_and_unstamped_ts() {
    let a = block_moved_envelope(&block());
    let b = block_moved_envelope(&block());
    assert_ne!(a.id, b.id);
    assert_eq!(a.ts, 0);
}

#[test]
fn emitted_payload_round_trips_through_the_event_applier() {
    // What we broadcast must be consumable by the same applier peers use.
    use crate::net::event_client_blocks::apply_block_event;
    use crate::state::blocks::BlockStore;

    let mut store = BlockStore::default();
    apply_block_event(&block_created_envelope(&block()), &mut store);
    assert_eq!(store.get("b1").map(|b| b.kind), Some(BlockKind::Link));

    apply_block_event(&block_moved_envelope(&block()), &mut store);
    assert_eq!(
        store.get("b1").map(|b| b.position),
        Some(Position { x: 12.0, y: 34.0 })
    );

    apply_block_event(&block_deleted_envelope(Some("board-1".to_owned()), "b1"), &mut store);
    assert!(store.is_empty());
}
