//! Picker filter for accepted input files.
//!
//! Only the filename is inspected. A file with a spoofed extension is
//! accepted here and fails later, at decode time.

/// Allowed file extensions for image uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Value for the `accept` attribute of the file input.
pub const ACCEPT_ATTRIBUTE: &str = ".png,.jpg,.jpeg";

/// Check whether a filename has an allowed image extension.
#[must_use]
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// Declared MIME type for a filename, based on its final extension.
#[must_use]
pub fn mime_for_name(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_png_and_jpeg_any_case() {
        assert!(has_allowed_extension("a.png"));
        assert!(has_allowed_extension("a.JPG"));
        assert!(has_allowed_extension("a.Jpeg"));
        assert!(has_allowed_extension("archive.tar.jpg"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!has_allowed_extension("a.webp"));
        assert!(!has_allowed_extension("a.bmp"));
        assert!(!has_allowed_extension("png"));
        assert!(!has_allowed_extension("a.png.txt"));
    }

    #[test]
    fn accept_attribute_matches_extensions() {
        let listed: Vec<&str> = ACCEPT_ATTRIBUTE
            .split(',')
            .map(|s| s.trim_start_matches('.'))
            .collect();
        assert_eq!(listed, ALLOWED_EXTENSIONS);
    }

    #[test]
    fn mime_types() {
        assert_eq!(mime_for_name("x.png"), "image/png");
        assert_eq!(mime_for_name("x.PNG"), "image/png");
        assert_eq!(mime_for_name("x.jpg"), "image/jpeg");
        assert_eq!(mime_for_name("x.jpeg"), "image/jpeg");
        assert_eq!(mime_for_name("x"), "application/octet-stream");
        assert_eq!(mime_for_name("x.gif"), "application/octet-stream");
    }
}
