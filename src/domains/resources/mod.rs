//! Resources domain module.
//!
//! Exposes the memory documents as read-only MCP resources so a client can
//! load the current task, development status and decision log at the start
//! of a session.
//!
//! ## Architecture
//!
//! - `registry.rs` - Resource metadata for each memory document
//! - `service.rs` - Resource service for listing and reading

mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{MARKDOWN_MIME_TYPE, get_all_resources};
pub use service::ResourceService;
