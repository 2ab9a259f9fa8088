//! Tools domain module.
//!
//! This module handles the MCP tools of the memory server. Each tool forwards
//! its arguments to one memory command mode through a `CommandRunner`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool definitions (one file per tool)
//! - `registry.rs` - Tool metadata and call resolution
//! - `router.rs` - Call dispatch and result wrapping
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `MemoryTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use definitions::MemoryTool;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::MemoryToolRouter;
