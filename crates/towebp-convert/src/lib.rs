//! towebp-convert: Native PNG/JPEG to WebP conversion (sans-IO).
//!
//! Decodes an image at its natural size and re-encodes the pixels as
//! lossy WebP at a fixed quality factor, with no scaling or cropping.
//! This is the same decode-draw-encode round trip the browser performs
//! with a canvas, done in Rust for the command-line tool and tests.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices.

pub mod decode;
pub mod encode;
pub mod pool;
pub mod types;

pub use pool::{available_parallelism, convert_bounded};
pub use types::{ConvertConfig, ConvertError, Converted, Dimensions};

/// Convert raw image bytes (PNG, JPEG) to WebP.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidConfig`] if `config` is out of range.
/// Returns [`ConvertError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`ConvertError::ImageDecode`] if the image cannot be decoded.
/// Returns [`ConvertError::TooLarge`] or [`ConvertError::Encode`] if the
/// WebP encoder cannot represent the image.
pub fn convert(image_bytes: &[u8], config: &ConvertConfig) -> Result<Converted, ConvertError> {
    config.validate()?;

    let rgba = decode::decode_rgba(image_bytes)?;
    let dimensions = Dimensions {
        width: rgba.width(),
        height: rgba.height(),
    };
    let bytes = encode::encode_webp(&rgba, config.quality)?;

    Ok(Converted { bytes, dimensions })
}
