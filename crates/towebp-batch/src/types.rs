//! Shared types for the towebp selection list and result store.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Durable identifier for a selected file.
///
/// Minted by [`Batch`](crate::Batch) when a file is added. Identifiers
/// increase monotonically and are never reused within a batch, even
/// after the file is removed or the batch is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(u64);

impl FileId {
    /// Create an identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A file about to be added to a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    /// Original filename, including extension.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl NewFile {
    /// Create a new file, deriving the MIME type from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = crate::selection::mime_for_name(&name).to_owned();
        Self { name, mime, bytes }
    }
}

/// A file in the selection list.
///
/// The bytes are shared so conversion jobs can hold them without
/// copying the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Durable identifier, used as the result store key.
    pub id: FileId,
    /// Original filename, including extension.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Arc<[u8]>,
}

/// Why a conversion did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{reason}")]
pub struct ConversionFailure {
    /// Human-readable reason, shown next to the file in the UI.
    pub reason: String,
}

impl ConversionFailure {
    /// Create a failure with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of converting one file.
///
/// A file with no status at all has never been converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus<R> {
    /// A conversion has started and not yet completed.
    Pending,
    /// The conversion produced a reference to WebP data.
    Succeeded(R),
    /// The conversion failed.
    Failed(ConversionFailure),
}

impl<R> ConversionStatus<R> {
    /// Returns `true` while a conversion is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The converted reference, if the conversion succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> Option<&R> {
        match self {
            Self::Succeeded(r) => Some(r),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    /// The failure, if the conversion failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&ConversionFailure> {
        match self {
            Self::Failed(f) => Some(f),
            Self::Pending | Self::Succeeded(_) => None,
        }
    }
}

/// Receipt for a started conversion.
///
/// Returned by [`Batch::begin`](crate::Batch::begin) and handed back to
/// [`Batch::complete`](crate::Batch::complete). A ticket from an older
/// run for the same file is stale and its outcome is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// The file being converted.
    pub id: FileId,
    /// Per-file run counter at the time the conversion started.
    pub generation: u64,
}
