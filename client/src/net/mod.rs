//! Networking modules for HTTP and the realtime event channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues REST commands, `envelope` normalizes their heterogeneous
//! response shapes, `event_client` manages the channel lifecycle,
//! `event_client_blocks` applies incoming events to the store, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod envelope;
pub mod event_client;
pub mod event_client_blocks;
pub mod types;
