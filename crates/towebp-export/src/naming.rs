//! Download filenames for converted images.

/// MIME type of a converted image.
pub const WEBP_MIME: &str = "image/webp";

/// Download name for the WebP conversion of `original`.
///
/// Everything from the **first** `.` onward is replaced by `.webp`, so
/// `archive.tar.jpg` becomes `archive.webp` rather than
/// `archive.tar.webp`. A name with no dot keeps its full text, and a
/// name starting with a dot keeps an empty stem (`.hidden.png` becomes
/// `.webp`).
#[must_use]
pub fn webp_file_name(original: &str) -> String {
    let stem = original
        .split_once('.')
        .map_or(original, |(stem, _)| stem);
    format!("{stem}.webp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_extension() {
        assert_eq!(webp_file_name("cat.png"), "cat.webp");
        assert_eq!(webp_file_name("dog.JPEG"), "dog.webp");
    }

    #[test]
    fn truncates_at_first_dot() {
        assert_eq!(webp_file_name("archive.tar.jpg"), "archive.webp");
        assert_eq!(webp_file_name("v1.2.3.png"), "v1.webp");
    }

    #[test]
    fn no_extension() {
        assert_eq!(webp_file_name("photo"), "photo.webp");
    }

    #[test]
    fn leading_dot_gives_empty_stem() {
        assert_eq!(webp_file_name(".hidden.png"), ".webp");
    }

    #[test]
    fn keeps_spaces_and_unicode() {
        assert_eq!(webp_file_name("my photo ✓.jpg"), "my photo ✓.webp");
    }
}
