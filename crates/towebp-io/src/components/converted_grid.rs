//! Grid of converted previews with per-file download buttons.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;
use towebp_batch::FileId;

/// One converted image, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedItem {
    /// Source file identifier, passed back on download.
    pub id: FileId,
    /// Original filename.
    pub name: String,
    /// Blob URL of the WebP data. Owned by the result store.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded size in bytes.
    pub size: usize,
}

/// Props for the [`ConvertedGrid`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ConvertedGridProps {
    /// Converted images in display order.
    items: Vec<ConvertedItem>,
    /// Called with the id of the image whose download button was clicked.
    on_download: EventHandler<FileId>,
}

/// The "Converted Images" section.
#[component]
pub fn ConvertedGrid(props: ConvertedGridProps) -> Element {
    let on_download = props.on_download;

    rsx! {
        div {
            h2 { class: "text-lg font-semibold mb-2 text-[var(--text-heading)]", "Converted Images:" }
            div { class: "grid grid-cols-1 sm:grid-cols-2 gap-4",
                for item in props.items.iter() {
                    {render_item(item, on_download)}
                }
            }
        }
    }
}

/// Render a single preview tile.
fn render_item(item: &ConvertedItem, on_download: EventHandler<FileId>) -> Element {
    let id = item.id;
    let size = format_size(item.size);

    rsx! {
        div { key: "{item.id}", class: "flex flex-col items-center p-4 rounded-lg bg-[var(--surface-hover)]",
            img {
                class: "max-w-full h-auto max-h-48 mb-2 rounded",
                src: "{item.url}",
                alt: "{item.name} as WebP",
            }
            p { class: "text-sm font-medium text-[var(--text-secondary)] break-all", "{item.name} converted!" }
            p { class: "text-xs text-[var(--muted)] mb-2", "{item.width}×{item.height} · {size}" }
            button {
                class: "inline-flex items-center gap-2 px-4 py-2 bg-[var(--btn-success)] hover:bg-[var(--btn-success-hover)] rounded text-white font-medium transition-colors cursor-pointer",
                onclick: move |_| on_download.call(id),
                Icon { width: 16, height: 16, icon: LdDownload }
                "Download WebP"
            }
        }
    }
}

/// Human-readable byte count (`512 B`, `1.5 KB`, `2.0 MB`).
#[must_use]
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    #[allow(clippy::cast_precision_loss)]
    let n = bytes as f64;
    if n < KB {
        format!("{bytes} B")
    } else if n < MB {
        format!("{:.1} KB", n / KB)
    } else {
        format!("{:.1} MB", n / MB)
    }
}
