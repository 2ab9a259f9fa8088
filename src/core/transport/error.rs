//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur while serving an MCP session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The initialize handshake with the client failed.
    #[error("Failed to start MCP session: {0}")]
    Handshake(String),

    /// The session task stopped abnormally.
    #[error("MCP session ended abnormally: {0}")]
    Session(String),
}

impl TransportError {
    pub fn handshake(msg: impl Into<String>) -> Self {
        Self::Handshake(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
