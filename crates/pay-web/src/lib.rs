//! Payment Form Frontend
//!
//! Leptos-based WASM frontend: collects billing details and card input,
//! asks the intent server for a client secret and confirms the payment
//! with Stripe.js.

mod api;
mod app;
mod components;
mod pages;
mod stripe_js;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
