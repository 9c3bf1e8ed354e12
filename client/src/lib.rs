//! # client
//!
//! Leptos + WASM frontend for the ideaboard collaborative brainstorming
//! canvas. Users place, move, edit, and delete content blocks on a shared
//! board; changes propagate to other viewers over the realtime channel.
//!
//! The crate's core is the reconciliation stack in `state::blocks`, `sync`,
//! and `net`: optimistic local mutations, authoritative REST responses, and
//! out-of-band channel events all converge on one block store under a
//! last-arrival-wins discipline.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod sync;
pub mod util;

/// Browser entry point: install panic/log hooks and hydrate the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
