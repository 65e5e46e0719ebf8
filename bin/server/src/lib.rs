//! Analytics dashboard web server and sign-in UI.
//!
//! Built with `ssr` this crate is the axum server that renders the pages and
//! relays `/api` calls to the backend; built with `hydrate` it is the WASM
//! bundle that runs the sign-in flow in the browser.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod error;
pub mod pages;
pub mod settings;

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod proxy;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
