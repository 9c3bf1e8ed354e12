//! Board-session state for the currently open board.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds board metadata and the realtime-channel connection lifecycle for one
//! joined board. Block data lives in [`crate::state::blocks::BlockStore`],
//! which has its own signal, so metadata churn does not re-render the canvas.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::net::types::User;

/// Metadata and channel status for the active board view.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    /// ID of the currently open board (UUID string).
    pub board_id: Option<String>,
    /// Display name of the open board.
    pub board_name: Option<String>,
    /// Display name of the board owner.
    pub owner: Option<String>,
    /// Collaborators with access to this board.
    pub collaborators: Vec<User>,
    /// Whether the board is publicly accessible.
    pub is_public: bool,
    /// True while the initial board fetch is in flight.
    pub loading: bool,
    /// Load error for the board fetch, if any.
    pub error: Option<String>,
    /// Current realtime-channel lifecycle state.
    pub connection_status: ConnectionStatus,
    /// Bumped every time the channel (re)connects. The board page watches
    /// this to re-join the room and re-fetch the full board, since missed
    /// events are not replayed.
    pub connection_epoch: u64,
}

impl BoardState {
    /// Reset everything tied to one open board. Called when the view closes
    /// or the route param changes.
    pub fn close(&mut self) {
        let status = self.connection_status;
        let epoch = self.connection_epoch;
        *self = Self::default();
        // Channel lifecycle outlives any single board view.
        self.connection_status = status;
        self.connection_epoch = epoch;
    }
}

/// Realtime-channel connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not connected; socket is closed or not yet opened.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Channel is open and events are flowing.
    Connected,
}
