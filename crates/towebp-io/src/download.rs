//! File download via blob URLs.
//!
//! Dioxus has no built-in file download API.  This module triggers
//! downloads by programmatically clicking a temporary `<a download>`
//! element pointed at a blob URL.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::object_url::{ObjectUrl, ObjectUrlError};

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<ObjectUrlError> for DownloadError {
    fn from(err: ObjectUrlError) -> Self {
        match err {
            ObjectUrlError::JsError(msg) => Self::JsError(msg),
        }
    }
}

/// Trigger a download of in-memory bytes.
///
/// Creates a `Blob` from `data` and a temporary blob URL for it, clicks
/// a `<a download="filename">` element, then revokes the URL.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., `Blob` creation, `URL.createObjectURL`, element creation).
pub fn trigger_download(
    data: &[u8],
    filename: &str,
    mime_type: &str,
) -> Result<(), DownloadError> {
    let url = ObjectUrl::from_bytes(data, mime_type)?;
    trigger_url_download(url.as_str(), filename)
    // `url` drops here and is revoked; the download is already initiated.
}

/// Trigger a download of the resource behind an existing URL.
///
/// The URL is not revoked; it stays owned by the caller.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if the document is unavailable or
/// the anchor element cannot be created.
pub fn trigger_url_download(url: &str, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    // Create a temporary <a> element, set href and download, click it.
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(url);
    anchor.set_download(filename);

    // Append to body, click, and remove.
    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // Failures here should not be reported as "download failed".
    let _ = body.remove_child(&anchor);

    Ok(())
}
