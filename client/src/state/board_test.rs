use super::*;

#[test]
fn connection_status_default_is_disconnected() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}

#[test]
fn connection_status_variants_are_distinct() {
    assert_ne!(ConnectionStatus::Disconnected, ConnectionStatus::Connecting);
    assert_ne!(ConnectionStatus::Disconnected, ConnectionStatus::Connected);
    assert_ne!(ConnectionStatus::Connecting, ConnectionStatus::Connected);
}

#[test]
fn board_state_default_has_no_board() {
    let state = BoardState::default();
    assert!(state.board_id.is_none());
    assert!(state.board_name.is_none());
    assert!(state.owner.is_none());
    assert!(state.collaborators.is_empty());
    assert!(!state.is_public);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn close_resets_board_fields_but_keeps_channel_lifecycle() {
    let mut state = BoardState {
        board_id: Some("board-1".to_owned()),
        board_name: Some("Sprint ideas".to_owned()),
        is_public: true,
        connection_status: ConnectionStatus::Connected,
        connection_epoch: 3,
        ..BoardState::default()
    };

    state.close();

    assert!(state.board_id.is_none());
    assert!(state.board_name.is_none());
    assert!(!state.is_public);
    assert_eq!(state.connection_status, ConnectionStatus::Connected);
    assert_eq!(state.connection_epoch, 3);
}
