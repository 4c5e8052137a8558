//! # client
//!
//! Leptos + WASM frontend for TouchGlyph, the Braille-learning platform.
//!
//! This crate contains pages, components, application state and the browser
//! side of networking. Request shapes and the typed backend clients live in
//! `wire`; the rules behind each screen (route guard, CRUD lifecycle, lesson
//! player, device panel) live in `flows`. What is left here is wiring those
//! into reactive views.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
