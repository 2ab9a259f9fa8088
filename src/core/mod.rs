//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the memory
//! server, including error handling, configuration, logging, server lifecycle
//! management, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::{McpServer, serve};
pub use transport::{TransportConfig, TransportService};
