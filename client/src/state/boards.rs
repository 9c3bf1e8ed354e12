//! Board-list state for the dashboard view.
//!
//! DESIGN
//! ======
//! Separating list state from active-board state keeps navigation inventory
//! decoupled from in-board editing data.

#[cfg(test)]
#[path = "boards_test.rs"]
mod boards_test;

/// A board summary for dashboard cards.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardListItem {
    pub id: String,
    pub name: String,
    pub is_public: bool,
    pub collaborator_count: usize,
}

/// Shared board list state backed by REST.
#[derive(Clone, Debug, Default)]
pub struct BoardsState {
    pub items: Vec<BoardListItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BoardsState {
    /// Insert a freshly created board at the front, replacing any existing
    /// entry with the same id.
    pub fn add(&mut self, item: BoardListItem) {
        if let Some(existing) = self.items.iter_mut().find(|b| b.id == item.id) {
            *existing = item;
        } else {
            self.items.insert(0, item);
        }
    }
}
