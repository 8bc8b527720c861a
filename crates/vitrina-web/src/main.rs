//! Vitrina entry point for WASM.

#![no_main]

use wasm_bindgen::prelude::wasm_bindgen;

/// Called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    vitrina_web::mount();
}
