//! Application state modules.
//!
//! ARCHITECTURE
//! ============
//! Each module is a plain data type provided as an `RwSignal` context at the
//! app root. The block store is deliberately separate from board metadata so
//! canvas re-renders track only block changes.

pub mod auth;
pub mod blocks;
pub mod board;
pub mod boards;
pub mod invites;
pub mod notices;
