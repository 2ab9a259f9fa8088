//! Prompt memory for coding agents.
//!
//! Keeps three markdown documents (current task, development status and a
//! decision log) under a memory root, and exposes them over the Model
//! Context Protocol.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, logging, the MCP server and its
//!   stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **memory**: Document store, block upsert, log append and dispatch
//!   - **bridge**: Runs memory commands as a child process or in-process
//!   - **tools**: MCP tools that forward to the memory command
//!   - **resources**: The memory documents as readable resources
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_memory_mcp::core::{Config, serve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(Config::from_env()).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
