//! Error types for the memory server.
//!
//! Errors inside a single tool call never reach this type: they are turned
//! into error-flagged tool results. What remains are failures that stop the
//! server from starting or serving.

use thiserror::Error;

/// A specialized Result type for memory server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the memory server.
#[derive(Debug, Error)]
pub enum Error {
    /// The command runner could not be set up.
    #[error("Bridge error: {0}")]
    Bridge(#[from] crate::domains::bridge::BridgeError),

    /// The MCP session could not be started or ended abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;

    #[test]
    fn test_transport_error_message() {
        let err: Error = TransportError::handshake("stdin closed").into();
        assert_eq!(
            err.to_string(),
            "Transport error: Failed to start MCP session: stdin closed"
        );
    }
}
