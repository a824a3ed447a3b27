//! towebp-io: Browser I/O and Dioxus component library.
//!
//! Handles blob URLs, canvas-based WebP encoding, file downloads, and
//! console logging, and provides the UI components for the towebp web
//! application.

pub mod canvas;
pub mod components;
pub mod console;
pub mod download;
pub mod object_url;
pub mod platform;

pub use canvas::{CanvasError, ConvertedWebp};
pub use components::{
    ConvertedGrid, ConvertedItem, ExportPanel, FileList, FileRow, FileUpload, RowState,
};
pub use object_url::ObjectUrl;
