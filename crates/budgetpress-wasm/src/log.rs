//! Status lines written to the browser console.
//!
//! The imported console functions only exist on wasm32, so native test
//! builds drop the messages.

#[cfg(target_arch = "wasm32")]
pub(crate) fn info(message: &str) {
    web_sys::console::info_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn info(_message: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(_message: &str) {}
