//! AI Image Generator Web App (Leptos + WASM)

mod api;
mod app;
mod components;

use app::App;
use imagegen_common::GeneratorConfig;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }

    leptos::mount::mount_to_body(|| view! { <App config=GeneratorConfig::default() /> });
}
