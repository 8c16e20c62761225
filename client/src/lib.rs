//! # campus-client
//!
//! Leptos + WASM frontend for the Campus school portal.
//!
//! This crate owns the browser session (`state::auth`), the route guard that
//! gates every page (`state::guard`, `components::route_guard`), the auth API
//! bindings, and the shared wire types the server reuses.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: attach to the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
