// Build scripts signal errors by panicking; there is no caller to
// return Result to. Cargo treats a non-zero exit as a build failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Build script for the towebp web app.
//!
//! Runs `npx @tailwindcss/cli` to compile `crates/towebp/tailwind.css`
//! into `$OUT_DIR/assets/tailwind.css`, which `main.rs` inlines with
//! `include_str!(env!("TAILWIND_CSS_PATH"))`. Compiling here means every
//! `cargo` invocation builds without `dx` having run first.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    // Workspace crates are siblings of this one under `crates/`.
    let crates_dir = manifest_dir
        .parent()
        .expect("could not find the crates directory");

    build_tailwind_css(&manifest_dir, crates_dir, &out_dir);
}

/// Compile Tailwind CSS via `npx @tailwindcss/cli`.
///
/// Input:  `crates/towebp/tailwind.css`
/// Output: `$OUT_DIR/assets/tailwind.css`
fn build_tailwind_css(manifest_dir: &Path, crates_dir: &Path, out_dir: &Path) {
    let input = manifest_dir.join("tailwind.css");
    let assets_dir = out_dir.join("assets");
    let output = assets_dir.join("tailwind.css");

    fs::create_dir_all(&assets_dir)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", assets_dir.display()));

    println!("cargo:rerun-if-changed={}", input.display());

    // Tailwind scans these crates for utility class names.
    register_rs_sources(&crates_dir.join("towebp"));
    register_rs_sources(&crates_dir.join("towebp-io"));

    let input_lossy = input.to_string_lossy();
    let output_lossy = output.to_string_lossy();
    let mut args: Vec<&str> = vec!["@tailwindcss/cli", "-i", &input_lossy, "-o", &output_lossy];

    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "release" {
        args.push("--minify");
    }

    // Without Node.js the stylesheet is left uncompiled: the theme
    // tokens still apply, the utility classes do not.
    match Command::new("npx").args(&args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            println!("cargo:warning=`npx @tailwindcss/cli` exited with {status}");
            fs::copy(&input, &output).unwrap();
        }
        Err(e) => {
            println!(
                "cargo:warning=failed to run `npx @tailwindcss/cli` ({e}); \
                 install Node.js and ensure `npx` is on PATH"
            );
            fs::copy(&input, &output).unwrap();
        }
    }

    println!("cargo:rustc-env=TAILWIND_CSS_PATH={}", output.display());
}

/// Recursively emit `cargo:rerun-if-changed` for every `.rs` file
/// under `dir`.
fn register_rs_sources(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            register_rs_sources(&path);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
