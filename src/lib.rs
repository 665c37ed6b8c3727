/// New Tab Redirect - Chrome Extension that replaces the new tab page
/// Built with Rust + WASM + Yew

pub mod error;
pub mod form;
pub mod probe;
pub mod redirect;
pub mod settings;
pub mod storage;
pub mod validation;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export URL validation for JavaScript access
#[wasm_bindgen]
pub fn validate_url(url: &str) -> bool {
    validation::validate_url(url)
}

// Start the Yew app for the new tab page
#[wasm_bindgen]
pub fn start_newtab() {
    yew::Renderer::<ui::newtab::NewTabPage>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
