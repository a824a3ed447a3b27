//! Owned blob URLs.
//!
//! `URL.createObjectURL` pins the blob in memory until the URL is
//! revoked. [`ObjectUrl`] owns one such URL and revokes it when dropped,
//! so replacing or discarding a converted result frees its data.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a blob URL.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// A blob URL that is revoked on drop.
///
/// Not `Clone`: exactly one owner is responsible for revocation.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Create a blob URL for an existing `Blob`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if `URL.createObjectURL` fails.
    pub fn from_blob(blob: &web_sys::Blob) -> Result<Self, ObjectUrlError> {
        let url = web_sys::Url::create_object_url_with_blob(blob)?;
        Ok(Self(url))
    }

    /// Copy `bytes` into a new `Blob` of the given MIME type and create
    /// a blob URL for it.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if `Blob` or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ObjectUrlError> {
        let blob = blob_from_bytes(bytes, mime_type)?;
        Self::from_blob(&blob)
    }

    /// The URL string, for `src` and `href` attributes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone with its document.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}

/// Copy `bytes` into a new `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns the browser's error if `Blob` construction fails.
pub fn blob_from_bytes(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
}
