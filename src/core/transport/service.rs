//! Transport service - runs one MCP session on the configured transport.

use rmcp::ServiceExt;
use tracing::{info, instrument};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::McpServer;

/// Runs the memory server on a transport until the client disconnects.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn description(&self) -> &'static str {
        self.config.description()
    }

    /// Serve `server` and block until the session ends.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            TransportConfig::Stdio => serve_stdio(server).await,
        }
    }
}

#[instrument(skip_all, fields(server = %server.name()))]
async fn serve_stdio(server: McpServer) -> TransportResult<()> {
    let session = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::handshake(e.to_string()))?;
    info!("Client connected over stdio");

    let reason = session
        .waiting()
        .await
        .map_err(|e| TransportError::session(e.to_string()))?;

    info!("Session closed: {:?}", reason);
    Ok(())
}
