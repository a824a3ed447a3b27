//! Logging to the browser console.
//!
//! Thin wrappers over `web_sys::console` so call sites pass plain
//! strings. Messages are prefixed with the app name to make them easy
//! to filter in devtools.

use wasm_bindgen::JsValue;

/// Prefix added to every message.
const PREFIX: &str = "[towebp]";

fn line(msg: &str) -> JsValue {
    JsValue::from_str(&format!("{PREFIX} {msg}"))
}

/// Log an informational message.
pub fn info(msg: &str) {
    web_sys::console::info_1(&line(msg));
}

/// Log a warning.
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&line(msg));
}

/// Log an error.
pub fn error(msg: &str) {
    web_sys::console::error_1(&line(msg));
}
