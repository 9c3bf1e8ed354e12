//! Reconciliation between local mutations, REST results, and channel events.
//!
//! ARCHITECTURE
//! ============
//! `pending` tracks which mutations are in flight, `actions` is the pure
//! begin/settle core (snapshot, optimistic apply, reconcile-or-rollback),
//! and `controller` wires those functions to the network and the Leptos
//! signals. Remote events enter the same store through
//! [`crate::net::event_client_blocks`].

pub mod actions;
pub mod controller;
pub mod pending;
