//! WebP encoding through an off-screen canvas.
//!
//! The browser already ships PNG/JPEG decoders and a WebP encoder, so
//! conversion is a round trip through DOM objects:
//!
//! 1. Wrap the source bytes in a `Blob` and point an `<img>` at it
//! 2. Wait for `HTMLImageElement.decode()`
//! 3. Draw the image at (0, 0) on a canvas of its natural size
//! 4. `canvas.toBlob(cb, "image/webp", quality)`
//! 5. Read the blob back into memory and give it its own blob URL
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::rc::Rc;

use towebp_batch::WEBP_QUALITY;
use towebp_export::WEBP_MIME;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::object_url::{ObjectUrl, ObjectUrlError};

/// Errors that can occur during canvas conversion.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The browser could not decode the source image.
    #[error("could not decode image: {0}")]
    Decode(String),

    /// The canvas has no 2D rendering context.
    #[error("canvas 2D context is unavailable")]
    NoContext,

    /// `toBlob` produced no data.
    #[error("the browser produced no encoded image")]
    EncoderUnavailable,

    /// The browser encoded to a different format, which happens when it
    /// has no WebP encoder and falls back to PNG.
    #[error("the browser cannot encode WebP (got {0:?})")]
    UnsupportedOutput(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<ObjectUrlError> for CanvasError {
    fn from(err: ObjectUrlError) -> Self {
        match err {
            ObjectUrlError::JsError(msg) => Self::JsError(msg),
        }
    }
}

/// A WebP image produced by [`convert_to_webp`].
#[derive(Debug)]
pub struct ConvertedWebp {
    /// Blob URL for preview and single-file download. Revoked on drop.
    pub url: ObjectUrl,
    /// Encoded bytes, kept for ZIP packaging.
    pub bytes: Rc<[u8]>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Convert PNG/JPEG bytes to WebP using the browser's codecs.
///
/// The output has the source's natural pixel dimensions and is encoded
/// at [`WEBP_QUALITY`].
///
/// # Errors
///
/// Returns [`CanvasError::Decode`] if the image cannot be decoded.
/// Returns [`CanvasError::NoContext`] if a 2D context is unavailable.
/// Returns [`CanvasError::EncoderUnavailable`] or
/// [`CanvasError::UnsupportedOutput`] if WebP encoding fails.
/// Returns [`CanvasError::JsError`] for any other browser API failure.
#[allow(clippy::future_not_send)] // WASM is single-threaded; DOM handles are !Send
pub async fn convert_to_webp(
    bytes: &[u8],
    mime_type: &str,
) -> Result<ConvertedWebp, CanvasError> {
    let window =
        web_sys::window().ok_or_else(|| CanvasError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| CanvasError::JsError("no document".into()))?;

    // 1–2. Decode via <img>. The source URL is only needed until decode
    // finishes; it is revoked when `source` drops.
    let source = ObjectUrl::from_bytes(bytes, mime_type)?;
    let img = web_sys::HtmlImageElement::new()?;
    img.set_src(source.as_str());
    JsFuture::from(img.decode())
        .await
        .map_err(|e| CanvasError::Decode(format!("{e:?}")))?;
    let (width, height) = (img.natural_width(), img.natural_height());

    // 3. Draw at natural size, no scaling.
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|e| CanvasError::JsError(format!("failed to cast element: {e:?}")))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let context: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(CanvasError::NoContext)?
        .dyn_into()
        .map_err(|_| CanvasError::NoContext)?;
    context.draw_image_with_html_image_element(&img, 0.0, 0.0)?;
    drop(source);

    // 4. Encode.
    let blob = canvas_to_blob(&canvas, WEBP_MIME, f64::from(WEBP_QUALITY)).await?;
    let produced = blob.type_();
    if produced != WEBP_MIME {
        return Err(CanvasError::UnsupportedOutput(produced));
    }

    // 5. Keep the bytes for packaging and a URL for display.
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    let bytes: Rc<[u8]> = js_sys::Uint8Array::new(&buffer).to_vec().into();
    let url = ObjectUrl::from_blob(&blob)?;

    Ok(ConvertedWebp {
        url,
        bytes,
        width,
        height,
    })
}

/// Await `canvas.toBlob(callback, mime_type, quality)`.
#[allow(clippy::future_not_send)]
async fn canvas_to_blob(
    canvas: &web_sys::HtmlCanvasElement,
    mime_type: &str,
    quality: f64,
) -> Result<web_sys::Blob, CanvasError> {
    let mut executor = |resolve: js_sys::Function, reject: js_sys::Function| {
        // `toBlob` passes `null` when encoding fails; resolve with
        // whatever arrives and sort it out after the await.
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(
            callback.unchecked_ref(),
            mime_type,
            &JsValue::from_f64(quality),
        ) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    };
    let promise = js_sys::Promise::new(&mut executor);

    let value = JsFuture::from(promise).await?;
    if value.is_null() || value.is_undefined() {
        return Err(CanvasError::EncoderUnavailable);
    }
    value
        .dyn_into::<web_sys::Blob>()
        .map_err(|_| CanvasError::EncoderUnavailable)
}
