//! Lossy WebP encoding.
//!
//! `image` only writes lossless WebP, so encoding goes through libwebp
//! via the `webp` crate, which takes a quality on a 0–100 scale.

use image::RgbaImage;

use crate::types::ConvertError;

/// Largest width or height a WebP image can have.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Encode an RGBA image as lossy WebP.
///
/// `quality` is on a 0.0–1.0 scale and is scaled to libwebp's 0–100.
///
/// # Errors
///
/// Returns [`ConvertError::TooLarge`] if either dimension exceeds
/// [`WEBP_MAX_DIMENSION`].
/// Returns [`ConvertError::Encode`] if libwebp rejects the image.
pub fn encode_webp(image: &RgbaImage, quality: f32) -> Result<Vec<u8>, ConvertError> {
    let (width, height) = image.dimensions();
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(ConvertError::TooLarge { width, height });
    }

    let encoder = webp::Encoder::from_rgba(image.as_raw(), width, height);
    let memory = encoder
        .encode_simple(false, quality * 100.0)
        .map_err(|e| ConvertError::Encode(format!("{e:?}")))?;
    Ok(memory.to_vec())
}
