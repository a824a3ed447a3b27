//! File upload component with drag-and-drop and a multi-file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use towebp_batch::NewFile;
use towebp_batch::selection::{ACCEPT_ATTRIBUTE, has_allowed_extension};

use crate::console;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with every accepted file from one pick or drop, in order.
    on_add: EventHandler<Vec<NewFile>>,
}

/// A drag-and-drop zone with a multi-file picker.
///
/// Accepts PNG and JPEG images. Files with other extensions, and files
/// that cannot be read, are reported below the zone and skipped; the
/// rest are forwarded together through `on_add`.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    // Shared by the file-picker and drag-and-drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let mut accepted = Vec::with_capacity(files.len());
        let mut rejected = Vec::new();
        let mut unreadable = Vec::new();

        for file in files {
            let name = file.name();
            if !has_allowed_extension(&name) {
                rejected.push(name);
                continue;
            }
            match file.read_bytes().await {
                Ok(bytes) => accepted.push(NewFile::new(name, bytes.to_vec())),
                Err(e) => {
                    console::warn(&format!("failed to read {name}: {e}"));
                    unreadable.push(name);
                }
            }
        }

        error.set(upload_error(&rejected, &unreadable));
        if !accepted.is_empty() {
            props.on_add.call(accepted);
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let border_class = if dragging() {
        "border-[var(--btn-primary)] bg-[var(--surface-hover)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface-muted)]"
    };

    rsx! {
        label {
            class: "flex flex-col items-center justify-center w-full h-48 border-2 border-dashed rounded-lg cursor-pointer transition-colors hover:bg-[var(--surface-hover)] {border_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            Icon { class: "mb-3 text-[var(--muted)]", width: 40, height: 40, icon: LdUpload }
            p { class: "mb-2 text-sm text-[var(--text-secondary)]",
                span { class: "font-semibold", "Click to upload" }
                " or drag and drop"
            }
            p { class: "text-xs text-[var(--muted)]", "PNG or JPG (Multiple files allowed)" }

            input {
                r#type: "file",
                accept: ACCEPT_ATTRIBUTE,
                multiple: true,
                class: "hidden",
                onchange: handle_files,
            }
        }

        if let Some(ref err) = error() {
            p { class: "mt-2 text-sm text-[var(--text-error)]", "{err}" }
        }
    }
}

/// Message describing skipped files, or `None` if every file was added.
fn upload_error(rejected: &[String], unreadable: &[String]) -> Option<String> {
    let mut parts = Vec::new();
    if !rejected.is_empty() {
        parts.push(format!("Unsupported file type: {}", rejected.join(", ")));
    }
    if !unreadable.is_empty() {
        parts.push(format!("Failed to read: {}", unreadable.join(", ")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(". "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn no_error_when_all_added() {
        assert_eq!(upload_error(&[], &[]), None);
    }

    #[test]
    fn lists_rejected_files() {
        assert_eq!(
            upload_error(&names(&["a.gif", "b.webp"]), &[]).as_deref(),
            Some("Unsupported file type: a.gif, b.webp")
        );
    }

    #[test]
    fn combines_both_kinds() {
        assert_eq!(
            upload_error(&names(&["a.gif"]), &names(&["b.png"])).as_deref(),
            Some("Unsupported file type: a.gif. Failed to read: b.png")
        );
    }
}
