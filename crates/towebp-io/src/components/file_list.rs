//! List of selected files with per-file status and removal.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use towebp_batch::{ConversionStatus, FileId, SelectedFile};

/// Conversion state shown next to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    /// Not converted yet.
    Idle,
    /// Conversion in flight.
    Pending,
    /// Converted successfully.
    Converted,
    /// Conversion failed with the given reason.
    Failed(String),
}

impl RowState {
    /// Map a store status (or its absence) to a row state.
    #[must_use]
    pub fn from_status<R>(status: Option<&ConversionStatus<R>>) -> Self {
        match status {
            None => Self::Idle,
            Some(ConversionStatus::Pending) => Self::Pending,
            Some(ConversionStatus::Succeeded(_)) => Self::Converted,
            Some(ConversionStatus::Failed(f)) => Self::Failed(f.reason.clone()),
        }
    }

    /// Short label, or `None` for files that have not been converted.
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Pending => Some("Converting…"),
            Self::Converted => Some("Converted"),
            Self::Failed(_) => Some("Failed"),
        }
    }

    /// Text colour of the status label.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Failed(_) => "text-[var(--text-error)]",
            Self::Converted => "text-[var(--btn-success)]",
            Self::Idle | Self::Pending => "text-[var(--muted)]",
        }
    }
}

/// One row of the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    /// File identifier, passed back on removal.
    pub id: FileId,
    /// Original filename.
    pub name: String,
    /// Conversion state.
    pub state: RowState,
}

impl FileRow {
    /// Build a row from a selected file and its store status.
    #[must_use]
    pub fn new<R>(file: &SelectedFile, status: Option<&ConversionStatus<R>>) -> Self {
        Self {
            id: file.id,
            name: file.name.clone(),
            state: RowState::from_status(status),
        }
    }
}

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Rows in display order.
    rows: Vec<FileRow>,
    /// Whether any conversion is in flight.
    busy: bool,
    /// Called with the id of the file whose remove button was clicked.
    on_remove: EventHandler<FileId>,
    /// Called when "Convert All" is clicked.
    on_convert_all: EventHandler<()>,
    /// Called when "Clear" is clicked.
    on_clear: EventHandler<()>,
}

/// The "Selected Files" section.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    let on_remove = props.on_remove;
    let on_convert_all = props.on_convert_all;
    let on_clear = props.on_clear;

    let convert_class = "grow px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors cursor-pointer disabled:opacity-50 disabled:cursor-not-allowed";
    let clear_class = "px-4 py-2 bg-[var(--btn-secondary)] hover:bg-[var(--btn-secondary-hover)] rounded text-white font-medium transition-colors cursor-pointer";

    rsx! {
        div {
            h2 { class: "text-lg font-semibold mb-2 text-[var(--text-heading)]", "Selected Files:" }
            ul { class: "space-y-2 mb-4",
                for row in props.rows.iter() {
                    {render_row(row, on_remove)}
                }
            }
            div { class: "flex gap-2",
                button {
                    class: convert_class,
                    disabled: props.busy,
                    onclick: move |_| on_convert_all.call(()),
                    if props.busy { "Converting…" } else { "Convert All to WebP" }
                }
                button {
                    class: clear_class,
                    onclick: move |_| on_clear.call(()),
                    "Clear"
                }
            }
        }
    }
}

/// Render a single file row.
fn render_row(row: &FileRow, on_remove: EventHandler<FileId>) -> Element {
    let id = row.id;
    let title = match row.state {
        RowState::Failed(ref reason) => reason.as_str(),
        _ => "",
    };
    let badge_class = row.state.badge_class();

    rsx! {
        li { key: "{row.id}", class: "flex items-center justify-between gap-2 p-2 rounded bg-[var(--surface-hover)]",
            span { class: "grow truncate text-sm text-[var(--text-secondary)]", "{row.name}" }
            if let Some(label) = row.state.label() {
                span { class: "text-xs font-medium {badge_class}", title: "{title}", "{label}" }
            }
            button {
                class: "text-[var(--text-error)] hover:opacity-75 cursor-pointer",
                aria_label: "Remove {row.name}",
                onclick: move |_| on_remove.call(id),
                Icon { width: 16, height: 16, icon: LdX }
            }
        }
    }
}
