//! Bridge-specific error types.

use std::time::Duration;

use thiserror::Error;

use crate::domains::memory::MemoryError;

/// Result type for command runner operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors that can occur while running a memory command.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The child process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and reported failure.
    ///
    /// Carries the captured standard error, or an exit-code message when the
    /// command wrote nothing there.
    #[error("{0}")]
    Failed(String),

    /// One of the captured streams grew past the configured bound.
    #[error("{stream} exceeded {limit} bytes, output truncated")]
    OutputLimit { stream: &'static str, limit: usize },

    /// The command did not finish in time and was killed.
    #[error("command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// I/O error while talking to the child process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-process dispatcher failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Create a spawn error for `program`.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a command failure error.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<tokio::task::JoinError> for BridgeError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::internal(format!("command task failed: {e}"))
    }
}
