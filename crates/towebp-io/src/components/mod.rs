//! Dioxus UI components for towebp.
//!
//! Provides the multi-file upload zone, the selected-file list, the grid
//! of converted previews, and the bulk export panel.

mod converted_grid;
mod export;
mod file_list;
mod upload;

pub use converted_grid::{ConvertedGrid, ConvertedItem, format_size};
pub use export::{ExportEntry, ExportPanel};
pub use file_list::{FileList, FileRow, RowState};
pub use upload::FileUpload;
