//! towebp-export: Pure output serializers (sans-IO)
//!
//! Names converted files for download and packages them into a single
//! ZIP archive. Triggering the actual download lives in `towebp-io`.

pub mod archive;
pub mod naming;

pub use archive::{ARCHIVE_NAME, ExportError, ZIP_MIME, build_archive, unique_entry_names};
pub use naming::{WEBP_MIME, webp_file_name};
