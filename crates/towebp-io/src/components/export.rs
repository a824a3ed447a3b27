//! Export panel with the bulk ZIP download button.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdArchive;
use towebp_export::{ARCHIVE_NAME, ZIP_MIME, build_archive, webp_file_name};

use crate::{console, download};

/// A converted file to include in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// Original filename; the entry name is derived from it.
    pub name: String,
    /// Encoded WebP bytes.
    pub bytes: Rc<[u8]>,
}

/// Props for the [`ExportPanel`] component.
#[derive(Props, Clone)]
pub struct ExportPanelProps {
    /// Converted files in display order.
    /// Wrapped in `Rc` to avoid cloning byte buffers on each render.
    entries: Rc<Vec<ExportEntry>>,
}

impl PartialEq for ExportPanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

/// Archive entries named the same way as single-file downloads.
fn archive_entries(entries: &[ExportEntry]) -> Vec<(String, Rc<[u8]>)> {
    entries
        .iter()
        .map(|e| (webp_file_name(&e.name), Rc::clone(&e.bytes)))
        .collect()
}

/// "Download All as ZIP" button.
///
/// Packages every entry into `converted_images.zip`. A failure aborts
/// the download and is shown under the button; no partial archive is
/// produced.
#[component]
pub fn ExportPanel(props: ExportPanelProps) -> Element {
    let mut export_error = use_signal(|| Option::<String>::None);

    let zip_click = {
        let entries = Rc::clone(&props.entries);
        move |_| {
            let named = archive_entries(&entries);
            let outcome = build_archive(&named)
                .map_err(|e| e.to_string())
                .and_then(|zip| {
                    download::trigger_download(&zip, ARCHIVE_NAME, ZIP_MIME)
                        .map_err(|e| e.to_string())
                });
            match outcome {
                Ok(()) => export_error.set(None),
                Err(msg) => {
                    console::error(&format!("bulk export failed: {msg}"));
                    export_error.set(Some(format!("Download failed: {msg}")));
                }
            }
        }
    };

    rsx! {
        div { class: "flex flex-col items-center gap-2",
            if let Some(ref err) = export_error() {
                p { class: "text-sm text-[var(--text-error)]", "{err}" }
            }
            button {
                class: "inline-flex items-center gap-2 px-4 py-2 bg-[var(--btn-accent)] hover:bg-[var(--btn-accent-hover)] rounded text-white font-medium transition-colors cursor-pointer",
                onclick: zip_click,
                Icon { width: 16, height: 16, icon: LdArchive }
                "Download All as ZIP"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_use_download_names() {
        let entries = [
            ExportEntry {
                name: "archive.tar.jpg".into(),
                bytes: Rc::from(vec![1u8]),
            },
            ExportEntry {
                name: "cat.png".into(),
                bytes: Rc::from(vec![2u8]),
            },
        ];
        let named = archive_entries(&entries);
        let names: Vec<&str> = named.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["archive.webp", "cat.webp"]);
        assert!(Rc::ptr_eq(&named[0].1, &entries[0].bytes));
    }
}
