use super::*;

// =============================================================
// numeric coercion
// =============================================================

#[test]
fn coerce_number_passes_finite_values_through() {
    assert_eq!(coerce_number(12.5), 12.5);
    assert_eq!(coerce_number(-3.0), -3.0);
    assert_eq!(coerce_number(0.0), 0.0);
}

#[test]
fn coerce_number_defaults_non_numeric_values_to_zero() {
    assert_eq!(coerce_number(f64::NAN), 0.0);
    assert_eq!(coerce_number(f64::INFINITY), 0.0);
    assert_eq!(coerce_number(f64::NEG_INFINITY), 0.0);
}

// =============================================================
// payload builders
// =============================================================

#[test]
fn create_block_payload_carries_all_required_fields() {
    let draft = CreateBlockDraft {
        kind: BlockKind::Text,
        content: "hello".to_owned(),
        position: Position { x: 10.0, y: 20.0 },
        board_id: "board-1".to_owned(),
        width: None,
        height: None,
    };
    let payload = create_block_payload(&draft);

    assert_eq!(payload["type"], "text");
    assert_eq!(payload["content"], "hello");
    assert_eq!(payload["position"]["x"], 10.0);
    assert_eq!(payload["position"]["y"], 20.0);
    assert_eq!(payload["boardId"], "board-1");
    assert!(payload.get("width").is_none());
    assert!(payload.get("height").is_none());
}

#[test]
fn create_block_payload_includes_explicit_size() {
    let draft = CreateBlockDraft {
        kind: BlockKind::Image,
        content: "https://cdn/x.png".to_owned(),
        position: Position::default(),
        board_id: "board-1".to_owned(),
        width: Some(320.0),
        height: Some(240.0),
    };
    let payload = create_block_payload(&draft);

    assert_eq!(payload["width"], 320.0);
    assert_eq!(payload["height"], 240.0);
}

#[test]
fn create_block_payload_coerces_non_numeric_position() {
    let draft = CreateBlockDraft {
        kind: BlockKind::Text,
        content: String::new(),
        position: Position {
            x: f64::NAN,
            y: f64::INFINITY,
        },
        board_id: "board-1".to_owned(),
        width: None,
        height: None,
    };
    let payload = create_block_payload(&draft);

    assert_eq!(payload["position"]["x"], 0.0);
    assert_eq!(payload["position"]["y"], 0.0);
}

#[test]
fn update_block_payload_only_carries_present_fields() {
    let payload = update_block_payload(&UpdateBlockPatch::content("edited"));

    assert_eq!(payload["content"], "edited");
    assert!(payload.get("position").is_none());
    assert!(payload.get("width").is_none());
    assert!(payload.get("height").is_none());
}

#[test]
fn update_block_payload_for_move_carries_position_only() {
    let payload =
        update_block_payload(&UpdateBlockPatch::position(Position { x: 50.0, y: 51.0 }));

    assert_eq!(payload["position"]["x"], 50.0);
    assert_eq!(payload["position"]["y"], 51.0);
    assert!(payload.get("content").is_none());
}

#[test]
fn update_block_payload_coerces_non_numeric_size() {
    let patch = UpdateBlockPatch {
        width: Some(f64::NAN),
        height: Some(180.0),
        ..UpdateBlockPatch::default()
    };
    let payload = update_block_payload(&patch);

    assert_eq!(payload["width"], 0.0);
    assert_eq!(payload["height"], 180.0);
}

#[test]
fn empty_update_patch_builds_empty_payload() {
    let payload = update_block_payload(&UpdateBlockPatch::default());
    assert_eq!(payload, serde_json::json!({}));
}

// =============================================================
// endpoints
// =============================================================

#[test]
fn endpoints_embed_identifiers() {
    assert_eq!(block_endpoint("b1"), "/api/blocks/b1");
    assert_eq!(board_endpoint("board-1"), "/api/boards/board-1");
    assert_eq!(
        user_invitations_endpoint("ada@example.com"),
        "/api/invitations/user/ada@example.com"
    );
    assert_eq!(
        accept_invitation_endpoint("tok-1"),
        "/api/invitations/accept/tok-1"
    );
}

// =============================================================
// upload preconditions
// =============================================================

#[test]
fn oversized_upload_is_rejected_before_any_network_call() {
    let six_mb = 6.0 * 1024.0 * 1024.0;
    let err = validate_image_upload("image/png", six_mb).expect_err("should reject");
    assert_eq!(err, "File size must be less than 5MB");
}

#[test]
fn upload_at_exactly_the_limit_is_accepted() {
    assert!(validate_image_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
}

#[test]
fn unsupported_mime_type_is_rejected() {
    let err = validate_image_upload("image/svg+xml", 1024.0).expect_err("should reject");
    assert_eq!(err, "Only JPEG, PNG, GIF, and WebP images are allowed");
    assert!(validate_image_upload("application/pdf", 1024.0).is_err());
}

#[test]
fn all_allowed_image_types_pass_validation() {
    for mime in ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"] {
        assert!(validate_image_upload(mime, 1024.0).is_ok(), "{mime}");
    }
}

#[test]
fn upload_url_read_from_data_wrapper_or_bare_body() {
    let wrapped = serde_json::json!({"data": {"url": "/uploads/a.png", "filename": "a.png"}});
    assert_eq!(
        upload_url_from_response(&wrapped).as_deref(),
        Some("/uploads/a.png")
    );

    let bare = serde_json::json!({"url": "/uploads/b.png"});
    assert_eq!(
        upload_url_from_response(&bare).as_deref(),
        Some("/uploads/b.png")
    );

    assert!(upload_url_from_response(&serde_json::json!({"ok": true})).is_none());
}

// =============================================================
// board list mapping
// =============================================================

#[test]
fn board_list_item_summarizes_board() {
    let board: Board = serde_json::from_value(serde_json::json!({
        "_id": "board-1",
        "name": "Sprint ideas",
        "isPublic": true,
        "collaborators": [
            {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
            {"_id": "u2", "name": "Grace", "email": "grace@example.com"}
        ]
    }))
    .expect("board");

    let item = board_list_item(&board);
    assert_eq!(item.id, "board-1");
    assert_eq!(item.name, "Sprint ideas");
    assert!(item.is_public);
    assert_eq!(item.collaborator_count, 2);
}
