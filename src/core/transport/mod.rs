//! Transport layer for the memory server.
//!
//! MCP messages travel over the server's stdin/stdout. Logging must never
//! write to stdout while a session is running.

mod config;
mod error;
mod service;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
