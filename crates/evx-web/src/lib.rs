//! EV Explorer Web - Browser frontend for the component explorer
//!
//! Binds the hotspot page markup to the `evx-core` controller. The 3D
//! rendering itself is done by the page's `<model-viewer>` element.

mod app;
mod dom;
mod error;
mod events;
mod fetch;

pub use error::WebError;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = app::run().await {
            web_sys::console::error_1(&format!("EV Explorer failed to start: {}", e).into());
        }
    });
}
