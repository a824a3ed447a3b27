//! Shared types for WebP conversion.

use serde::{Deserialize, Serialize};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for a single conversion.
///
/// The quality factor is fixed for users of the app and CLI; it is
/// configurable here so the encoder can be exercised directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Lossy compression quality on a 0.0–1.0 scale.
    pub quality: f32,
}

impl ConvertConfig {
    /// Default quality factor, matching what the browser canvas encoder
    /// is asked for.
    pub const DEFAULT_QUALITY: f32 = 0.8;

    /// Check that all parameters are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidConfig`] if `quality` is not a
    /// finite value in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.quality.is_finite() && (0.0..=1.0).contains(&self.quality) {
            Ok(())
        } else {
            Err(ConvertError::InvalidConfig(format!(
                "quality must be within 0.0..=1.0, got {}",
                self.quality
            )))
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

/// A successfully converted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// Encoded WebP bytes.
    pub bytes: Vec<u8>,
    /// Pixel dimensions, identical to the source image.
    pub dimensions: Dimensions,
}

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The image exceeds what WebP can represent.
    #[error(
        "image is {width}x{height}, WebP allows at most {max}x{max}",
        max = crate::encode::WEBP_MAX_DIMENSION
    )]
    TooLarge {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// The WebP encoder rejected the image.
    #[error("WebP encoding failed: {0}")]
    Encode(String),

    /// Conversion configuration is invalid.
    #[error("invalid conversion configuration: {0}")]
    InvalidConfig(String),
}
