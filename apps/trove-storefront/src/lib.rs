//! TechnoTrove storefront in the browser.
//!
//! Screens, navigation and the API client live in `trove-screens`; this
//! crate renders the current screen and forwards clicks as events.

mod app;
mod shop;
mod sink;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use app::App;
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
