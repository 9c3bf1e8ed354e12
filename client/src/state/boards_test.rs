use super::*;

fn item(id: &str, name: &str) -> BoardListItem {
    BoardListItem {
        id: id.to_owned(),
        name: name.to_owned(),
        is_public: false,
        collaborator_count: 0,
    }
}

#[test]
fn boards_state_default_is_empty() {
    let state = BoardsState::default();
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn add_inserts_new_board_at_front() {
    let mut state = BoardsState::default();
    state.add(item("a", "First"));
    state.add(item("b", "Second"));
    assert_eq!(state.items[0].id, "b");
    assert_eq!(state.items.len(), 2);
}

#[test]
fn add_replaces_existing_board_with_same_id() {
    let mut state = BoardsState::default();
    state.add(item("a", "First"));
    state.add(item("a", "Renamed"));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Renamed");
}
