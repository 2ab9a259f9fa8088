//! Domains module containing business logic organized by bounded contexts.
//!
//! - **memory**: the memory documents and the command that updates them
//! - **bridge**: runners that execute memory commands for the server
//! - **tools**: MCP tools that forward calls to a runner
//! - **resources**: the memory documents exposed as readable resources

pub mod bridge;
pub mod memory;
pub mod resources;
pub mod tools;
