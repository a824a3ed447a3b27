//! Image decoding.
//!
//! Accepts raw image bytes and produces an RGBA raster at the image's
//! natural size. The format is detected from the content, not from the
//! filename, so a mislabelled file decodes if its bytes are valid.

use image::RgbaImage;

use crate::types::ConvertError;

/// Decode raw image bytes into an RGBA image.
///
/// # Errors
///
/// Returns [`ConvertError::EmptyInput`] if `bytes` is empty.
/// Returns [`ConvertError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, ConvertError> {
    if bytes.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(decode_rgba(&[]), Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode_rgba(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(ConvertError::ImageDecode(_))));
    }

    #[test]
    fn jpeg_decodes_to_natural_size() {
        let img = image::RgbImage::from_fn(13, 7, |x, y| {
            image::Rgb([
                u8::try_from(x * 10).unwrap(),
                u8::try_from(y * 20).unwrap(),
                90,
            ])
        });
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 90);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

        let rgba = decode_rgba(&buf).unwrap();
        assert_eq!(rgba.dimensions(), (13, 7));
        // JPEG has no alpha channel; every pixel must be opaque.
        assert!(rgba.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn png_alpha_is_preserved() {
        let img = image::RgbaImage::from_fn(2, 1, |x, _| {
            image::Rgba([10, 20, 30, if x == 0 { 0 } else { 255 }])
        });
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();

        let rgba = decode_rgba(&buf).unwrap();
        assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
        assert_eq!(rgba.get_pixel(1, 0).0[3], 255);
    }
}
