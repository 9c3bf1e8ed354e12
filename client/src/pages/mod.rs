//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, room membership,
//! redirects) and delegates rendering details to `components`.

pub mod board;
pub mod dashboard;
pub mod login;
