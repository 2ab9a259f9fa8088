//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging and serves the memory tools and
//! resources over stdio.

use anyhow::Result;
use tracing::info;

use prompt_memory_mcp::core::{Config, init_logging, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Memory root: {}", config.memory.root.display());

    serve(config).await?;

    info!("Server shutting down");

    Ok(())
}
