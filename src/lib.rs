//! # nextech-storefront
//!
//! Leptos + WASM frontend for the NexTechAI storefront. Authentication,
//! product browsing, cart, checkout, order history, and the "Alex"
//! shopping assistant are all rendered client-side against a remote
//! HTTP API.
//!
//! The `session` module owns the access/refresh token lifecycle and the
//! authenticated request gateway; everything else consumes it through
//! the typed helpers in `net`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;

/// WASM entry point for client-side hydration.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
