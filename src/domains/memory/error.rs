//! Memory-specific error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for memory document operations.
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Errors that can occur while reading or rewriting memory documents.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// An I/O error on a specific document.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Both sentinels exist but no end sentinel follows the first start sentinel.
    #[error("Malformed section '{marker}' in {}: end sentinel precedes start sentinel", path.display())]
    MalformedSection { marker: String, path: PathBuf },

    /// The requested mode is not one of the supported operations.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
}

impl MemoryError {
    /// Create an I/O error bound to a document path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a malformed section error.
    pub fn malformed(marker: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::MalformedSection {
            marker: marker.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an unknown mode error.
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode(mode.into())
    }
}
