//! towebp-cli: Batch PNG/JPEG to WebP conversion from the command line.
//!
//! Applies the same rules as the web app: only `.png`, `.jpg` and `.jpeg`
//! inputs are accepted, every image is re-encoded at its natural size as
//! lossy WebP at quality 0.8, and outputs are named `<prefix>.webp`. With
//! `--zip` the outputs are packaged into `converted_images.zip` instead.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin towebp-cli -- [OPTIONS] <INPUTS>...
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use towebp_batch::selection::has_allowed_extension;
use towebp_batch::{
    Batch, BatchConfig, ConversionFailure, ConversionStatus, FileId, NewFile, Ticket, WEBP_QUALITY,
};
use towebp_convert::{ConvertConfig, Converted};
use towebp_export::{ARCHIVE_NAME, build_archive, unique_entry_names, webp_file_name};

/// Convert PNG and JPEG images to WebP.
///
/// Each input is converted independently; a failure is reported and the
/// remaining inputs are still converted.
#[derive(Parser)]
#[command(name = "towebp-cli", version)]
struct Cli {
    /// Input images (PNG or JPEG).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the WebP files (or the ZIP archive) are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write a single `converted_images.zip` instead of individual files.
    #[arg(long)]
    zip: bool,

    /// Maximum number of conversions running at once.
    ///
    /// Defaults to the available parallelism.
    #[arg(long)]
    jobs: Option<NonZeroUsize>,

    /// Print a JSON report of per-file outcomes instead of a summary.
    #[arg(long)]
    json: bool,

    /// Full batch config as a JSON string.
    ///
    /// When provided, `--jobs` is ignored. The JSON must be a valid
    /// `BatchConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build a [`BatchConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and
/// `--jobs` is ignored.
fn config_from_cli(cli: &Cli) -> Result<BatchConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json)
            .map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(BatchConfig {
        max_concurrency: cli.jobs,
    })
}

/// Outcome of one input.
#[derive(Debug, Serialize)]
struct FileReport {
    input: PathBuf,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Converted {
        /// File name in the output directory, or entry name in the archive.
        output: String,
        width: u32,
        height: u32,
        size: usize,
    },
    Failed {
        reason: String,
    },
}

/// Everything printed with `--json`.
#[derive(Debug, Serialize)]
struct Report {
    converted: usize,
    failed: usize,
    skipped: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archive: Option<PathBuf>,
    files: Vec<FileReport>,
}

impl Report {
    fn is_success(&self) -> bool {
        self.failed == 0 && self.converted > 0
    }
}

/// Name shown for an input: its file name, or the whole path if it has none.
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Convert every file in the batch with at most `limit` conversions in
/// flight, recording each outcome as it completes.
fn convert_all(batch: &mut Batch<Converted>, limit: usize) {
    let jobs: Vec<(Ticket, String, Arc<[u8]>)> = batch
        .begin_all()
        .into_iter()
        .filter_map(|ticket| {
            batch
                .file(ticket.id)
                .map(|f| (ticket, f.name.clone(), Arc::clone(&f.bytes)))
        })
        .collect();
    let inputs: Vec<Arc<[u8]>> = jobs.iter().map(|(_, _, bytes)| Arc::clone(bytes)).collect();
    let config = ConvertConfig {
        quality: WEBP_QUALITY,
    };

    towebp_convert::convert_bounded(&inputs, &config, limit, |index, outcome| {
        let Some((ticket, name, _)) = jobs.get(index) else {
            return;
        };
        let outcome = match outcome {
            Ok(converted) => {
                eprintln!(
                    "{name}: {}x{}, {} bytes",
                    converted.dimensions.width,
                    converted.dimensions.height,
                    converted.bytes.len(),
                );
                Ok(converted)
            }
            Err(e) => {
                eprintln!("{name}: {e}");
                Err(ConversionFailure::new(e.to_string()))
            }
        };
        if !batch.complete(*ticket, outcome) {
            eprintln!("{name}: result discarded");
        }
    });
}

/// Output names for every converted file, in display order, made unique
/// so no output overwrites another.
fn output_names(batch: &Batch<Converted>) -> HashMap<FileId, String> {
    let (ids, names): (Vec<FileId>, Vec<String>) = batch
        .converted()
        .map(|(f, _)| (f.id, webp_file_name(&f.name)))
        .unzip();
    ids.into_iter()
        .zip(unique_entry_names(names.iter().map(String::as_str)))
        .collect()
}

/// Write the converted files (or the archive) into `out_dir`.
///
/// Returns the archive path when `zip` is set.
fn write_outputs(
    batch: &Batch<Converted>,
    names: &HashMap<FileId, String>,
    out_dir: &Path,
    zip: bool,
) -> Result<Option<PathBuf>, String> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| format!("Error creating {}: {e}", out_dir.display()))?;

    let outputs: Vec<(&str, &[u8])> = batch
        .converted()
        .filter_map(|(f, c)| names.get(&f.id).map(|n| (n.as_str(), c.bytes.as_slice())))
        .collect();

    if zip {
        let archive =
            build_archive(&outputs).map_err(|e| format!("Error building archive: {e}"))?;
        let path = out_dir.join(ARCHIVE_NAME);
        std::fs::write(&path, &archive)
            .map_err(|e| format!("Error writing {}: {e}", path.display()))?;
        eprintln!("Archive written to {} ({} bytes)", path.display(), archive.len());
        return Ok(Some(path));
    }

    for (name, bytes) in outputs {
        let path = out_dir.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| format!("Error writing {}: {e}", path.display()))?;
    }
    Ok(None)
}

/// Per-file outcomes in display order.
fn file_reports(
    batch: &Batch<Converted>,
    sources: &HashMap<FileId, PathBuf>,
    names: &HashMap<FileId, String>,
) -> Vec<FileReport> {
    batch
        .files()
        .iter()
        .map(|f| {
            let outcome = match (batch.status(f.id), names.get(&f.id)) {
                (Some(ConversionStatus::Succeeded(c)), Some(output)) => Outcome::Converted {
                    output: output.clone(),
                    width: c.dimensions.width,
                    height: c.dimensions.height,
                    size: c.bytes.len(),
                },
                (Some(ConversionStatus::Failed(failure)), _) => Outcome::Failed {
                    reason: failure.reason.clone(),
                },
                _ => Outcome::Failed {
                    reason: "not converted".to_owned(),
                },
            };
            FileReport {
                input: sources
                    .get(&f.id)
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(&f.name)),
                outcome,
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let (accepted, skipped): (Vec<&PathBuf>, Vec<&PathBuf>) = cli
        .inputs
        .iter()
        .partition(|path| has_allowed_extension(&display_name(path)));
    for path in &skipped {
        eprintln!("Skipping {}: not a PNG or JPEG file", path.display());
    }

    let mut batch = Batch::<Converted>::new();
    let mut sources = HashMap::new();
    let mut unreadable = Vec::new();
    for path in accepted {
        match std::fs::read(path) {
            Ok(bytes) => {
                let ids = batch.add_files([NewFile::new(display_name(path), bytes)]);
                sources.extend(ids.into_iter().map(|id| (id, path.clone())));
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                unreadable.push(FileReport {
                    input: path.clone(),
                    outcome: Outcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    let limit = config.effective_concurrency(towebp_convert::available_parallelism());
    eprintln!("Converting {} file(s), {limit} at a time", batch.len());
    convert_all(&mut batch, limit);

    let names = output_names(&batch);
    let archive = match write_outputs(&batch, &names, &cli.out_dir, cli.zip) {
        Ok(archive) => archive,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut files = file_reports(&batch, &sources, &names);
    files.extend(unreadable);
    let report = Report {
        converted: batch.converted_count(),
        failed: files.len() - batch.converted_count(),
        skipped: skipped.into_iter().cloned().collect(),
        archive,
        files,
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "Converted {} of {} file(s), {} failed, {} skipped",
            report.converted,
            report.files.len(),
            report.failed,
            report.skipped.len(),
        );
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
