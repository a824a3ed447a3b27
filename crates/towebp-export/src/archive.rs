//! ZIP packaging for bulk download.
//!
//! Entries are written with the `Stored` method: WebP data is already
//! compressed, and storing keeps archive creation cheap in the browser.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Download name of the bulk archive.
pub const ARCHIVE_NAME: &str = "converted_images.zip";

/// MIME type of the bulk archive.
pub const ZIP_MIME: &str = "application/zip";

/// Errors that can occur while building an archive.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The ZIP writer rejected an entry or failed to finish.
    #[error("failed to write ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry data failed.
    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Package `(entry name, bytes)` pairs into an in-memory ZIP archive.
///
/// Entries are written in the given order, one per pair. Names that
/// repeat get a ` (n)` suffix before their extension so the archive
/// always holds exactly one entry per input.
///
/// # Errors
///
/// Returns [`ExportError`] if the ZIP writer fails.
pub fn build_archive<N, B>(entries: &[(N, B)]) -> Result<Vec<u8>, ExportError>
where
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let names = unique_entry_names(entries.iter().map(|(name, _)| name.as_ref()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, (_, bytes)) in names.into_iter().zip(entries) {
        writer.start_file(name, options)?;
        writer.write_all(bytes.as_ref())?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Disambiguate repeated names, keeping the first occurrence unchanged.
///
/// `photo.webp`, `photo.webp` becomes `photo.webp`, `photo (1).webp`.
#[must_use]
pub fn unique_entry_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            if used.insert(name.to_owned()) {
                return name.to_owned();
            }
            let (stem, ext) = name
                .rsplit_once('.')
                .map_or((name, None), |(stem, ext)| (stem, Some(ext)));
            (1u32..)
                .map(|n| {
                    ext.map_or_else(
                        || format!("{stem} ({n})"),
                        |ext| format!("{stem} ({n}).{ext}"),
                    )
                })
                .find(|candidate| used.insert(candidate.clone()))
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Read;

    use super::*;

    fn read_entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        (0..zip.len())
            .map(|i| {
                let mut entry = zip.by_index(i).unwrap();
                let mut data = Vec::new();
                entry.read_to_end(&mut data).unwrap();
                (entry.name().to_owned(), data)
            })
            .collect()
    }

    #[test]
    fn one_entry_per_input_in_order() {
        let entries = [("a.webp", vec![1u8, 2, 3]), ("b.webp", vec![4, 5])];
        let archive = build_archive(&entries).unwrap();
        let read = read_entries(&archive);
        assert_eq!(
            read,
            [
                ("a.webp".to_owned(), vec![1, 2, 3]),
                ("b.webp".to_owned(), vec![4, 5]),
            ]
        );
    }

    #[test]
    fn entries_are_stored_uncompressed() {
        let archive = build_archive(&[("a.webp", [0u8; 64])]).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn empty_archive_is_valid() {
        let entries: [(&str, Vec<u8>); 0] = [];
        let archive = build_archive(&entries).unwrap();
        assert!(read_entries(&archive).is_empty());
    }

    #[test]
    fn colliding_names_are_disambiguated() {
        let entries = [
            ("photo.webp", vec![1u8]),
            ("photo.webp", vec![2]),
            ("photo.webp", vec![3]),
        ];
        let archive = build_archive(&entries).unwrap();
        let names: Vec<String> = read_entries(&archive).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["photo.webp", "photo (1).webp", "photo (2).webp"]);
    }

    #[test]
    fn unique_names_skip_taken_suffixes() {
        let names = unique_entry_names(["a (1).webp", "a.webp", "a.webp"]);
        assert_eq!(names, ["a (1).webp", "a.webp", "a (2).webp"]);
    }

    #[test]
    fn unique_names_without_extension() {
        let names = unique_entry_names(["x", "x"]);
        assert_eq!(names, ["x", "x (1)"]);
    }
}
