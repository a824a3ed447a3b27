//! towebp-batch: Selection list and conversion result store (sans-IO).
//!
//! Tracks the files a user has picked, in insertion order, and the
//! outcome of converting each one. Results are keyed by a durable
//! [`FileId`] minted when the file is added, so removing a file never
//! shifts the results of the files around it.
//!
//! The store is generic over the converted reference type `R`: the
//! browser keeps a blob URL handle, the CLI keeps encoded bytes.
//! Dropping a reference is how it gets released, and the store drops
//! replaced and removed references immediately.
//!
//! This crate has **no I/O dependencies**.

pub mod batch;
pub mod config;
pub mod selection;
pub mod types;

pub use batch::Batch;
pub use config::{BatchConfig, WEBP_QUALITY};
pub use types::{ConversionFailure, ConversionStatus, FileId, NewFile, SelectedFile, Ticket};
