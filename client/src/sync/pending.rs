//! In-flight mutation registry for the reconciliation controller.
//!
//! DESIGN
//! ======
//! One entry per outstanding local mutation, keyed by block id (creates use a
//! client-side correlation id until the server assigns one). The lifecycle is
//! `idle → optimistic-pending → {confirmed | failed}`; a key is idle when
//! absent, and settling removes the entry again, so the registry only ever
//! holds work that is actually in flight.
//!
//! Overlapping mutations for the same id are allowed: the newer `begin`
//! overwrites the older entry, and whichever settle arrives last wins at the
//! store. That race is part of the ordering contract, not hidden here.

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;

use std::collections::HashMap;

/// What kind of local mutation is outstanding for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Edit,
    Move,
    Delete,
}

/// Lifecycle position of a mutation key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpState {
    /// No local mutation outstanding.
    #[default]
    Idle,
    /// An optimistic change is applied (or a request is running) ahead of
    /// server confirmation.
    OptimisticPending,
    /// The server returned a valid normalized block; store reconciled.
    Confirmed,
    /// No valid result; store rolled back (where applicable).
    Failed,
}

/// Registry of in-flight mutations.
#[derive(Clone, Debug, Default)]
pub struct PendingSet {
    ops: HashMap<String, OpKind>,
}

impl PendingSet {
    /// Enter `optimistic-pending` for a key, replacing any older entry.
    pub fn begin(&mut self, key: impl Into<String>, kind: OpKind) {
        self.ops.insert(key.into(), kind);
    }

    /// Settle a key, returning the terminal state it passed through.
    ///
    /// Returns [`OpState::Idle`] when nothing was pending, i.e. a late
    /// settle after a newer mutation already claimed the key.
    pub fn settle(&mut self, key: &str, success: bool) -> OpState {
        if self.ops.remove(key).is_none() {
            return OpState::Idle;
        }
        if success { OpState::Confirmed } else { OpState::Failed }
    }

    /// Current lifecycle state of a key.
    #[must_use]
    pub fn state_of(&self, key: &str) -> OpState {
        if self.ops.contains_key(key) {
            OpState::OptimisticPending
        } else {
            OpState::Idle
        }
    }

    /// Kind of the outstanding mutation for a key, if any.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<OpKind> {
        self.ops.get(key).copied()
    }

    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.ops.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drop every entry. Used when the board view closes with work still in
    /// flight; late settles then resolve to idle.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}
