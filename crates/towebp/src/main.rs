use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use futures::StreamExt;
use towebp_batch::{
    Batch, BatchConfig, ConversionFailure, ConversionStatus, FileId, NewFile, Ticket,
};
use towebp_export::webp_file_name;
use towebp_io::components::ExportEntry;
use towebp_io::{
    ConvertedGrid, ConvertedItem, ConvertedWebp, ExportPanel, FileList, FileRow, FileUpload,
    canvas, console, download, platform,
};

fn main() {
    dioxus::launch(app);
}

/// One queued conversion.
struct Job {
    ticket: Ticket,
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

/// Root application component.
///
/// Owns the batch of selected files and their conversion results, and
/// wires together the upload zone, file list, converted grid, and
/// export panel. The file list and converted sections are omitted
/// entirely while they have nothing to show.
fn app() -> Element {
    // --- Application state ---
    let mut batch = use_signal(Batch::<ConvertedWebp>::new);
    let config = BatchConfig::default();

    // --- File selector handlers ---
    let on_add = move |files: Vec<NewFile>| {
        batch.write().add_files(files);
    };

    let on_remove = move |id: FileId| {
        batch.write().remove(id);
    };

    let on_clear = move |()| {
        batch.write().clear();
    };

    // --- Conversion ---
    // Every file starts a new run; the store ignores completions from
    // runs that have since been superseded.
    let on_convert_all = move |()| {
        let jobs: Vec<Job> = {
            let mut b = batch.write();
            let tickets = b.begin_all();
            tickets
                .into_iter()
                .filter_map(|ticket| {
                    b.file(ticket.id).map(|f| Job {
                        ticket,
                        name: f.name.clone(),
                        mime: f.mime.clone(),
                        bytes: Arc::clone(&f.bytes),
                    })
                })
                .collect()
        };
        let limit = config.effective_concurrency(platform::hardware_concurrency());
        spawn(run_conversions(batch, jobs, limit));
    };

    // --- Single download ---
    let on_download = move |id: FileId| {
        let b = batch.read();
        let Some(file) = b.file(id) else {
            return;
        };
        let Some(converted) = b.status(id).and_then(ConversionStatus::succeeded) else {
            return;
        };
        let filename = webp_file_name(&file.name);
        if let Err(e) = download::trigger_url_download(converted.url.as_str(), &filename) {
            console::error(&format!("download of {filename} failed: {e}"));
        }
    };

    // --- View data ---
    let b = batch.read();
    let has_files = !b.is_empty();
    let busy = b.pending_count() > 0;
    let rows: Vec<FileRow> = b
        .files()
        .iter()
        .map(|f| FileRow::new(f, b.status(f.id)))
        .collect();
    let items: Vec<ConvertedItem> = b
        .converted()
        .map(|(f, c)| ConvertedItem {
            id: f.id,
            name: f.name.clone(),
            url: c.url.as_str().to_owned(),
            width: c.width,
            height: c.height,
            size: c.bytes.len(),
        })
        .collect();
    let entries: Rc<Vec<ExportEntry>> = Rc::new(
        b.converted()
            .map(|(f, c)| ExportEntry {
                name: f.name.clone(),
                bytes: Rc::clone(&c.bytes),
            })
            .collect(),
    );
    drop(b);

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!(env!("TAILWIND_CSS_PATH")) }

        div { class: "min-h-screen flex items-center justify-center p-4 bg-linear-to-br from-[var(--bg-from)] to-[var(--bg-to)]",
            div { class: "w-full max-w-2xl p-8 rounded-lg bg-[var(--surface)] shadow-xl",
                h1 { class: "text-3xl font-bold text-center mb-6 text-[var(--text-heading)]", "Multi-image PNG/JPG to WebP Converter" }

                div { class: "space-y-6",
                    FileUpload {
                        on_add: on_add,
                    }

                    if has_files {
                        FileList {
                            rows: rows,
                            busy: busy,
                            on_remove: on_remove,
                            on_convert_all: on_convert_all,
                            on_clear: on_clear,
                        }
                    }

                    if !items.is_empty() {
                        ConvertedGrid {
                            items: items,
                            on_download: on_download,
                        }
                        ExportPanel {
                            entries: entries,
                        }
                    }
                }
            }
        }
    }
}

/// Convert every job with at most `limit` conversions in flight,
/// recording each outcome as soon as it completes.
async fn run_conversions(
    mut batch: Signal<Batch<ConvertedWebp>>,
    jobs: Vec<Job>,
    limit: usize,
) {
    futures::stream::iter(jobs)
        .for_each_concurrent(limit, move |job| async move {
            let outcome = canvas::convert_to_webp(&job.bytes, &job.mime)
                .await
                .map_err(|e| {
                    console::warn(&format!("conversion of {} failed: {e}", job.name));
                    ConversionFailure::new(e.to_string())
                });
            if !batch.write().complete(job.ticket, outcome) {
                console::info(&format!("discarded stale result for {}", job.name));
            }
        })
        .await;
}
