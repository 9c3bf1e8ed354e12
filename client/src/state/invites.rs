//! Invitation-list state for the dashboard.

#[cfg(test)]
#[path = "invites_test.rs"]
mod invites_test;

use crate::net::types::Invitation;

/// Pending invitations addressed to the signed-in user.
#[derive(Clone, Debug, Default)]
pub struct InviteState {
    pub items: Vec<Invitation>,
    pub loading: bool,
}

impl InviteState {
    /// Drop an invitation once it has been accepted.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }
}
