//! Configuration management for the memory server and command.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::domains::bridge::DEFAULT_MAX_OUTPUT_BYTES;

/// Environment variable naming the directory that holds the memory documents.
pub const MEMORY_ROOT_ENV: &str = "MCP_MEMORY_ROOT";

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "MCP_LOG_LEVEL";

/// Default memory directory, relative to the working directory.
pub const DEFAULT_MEMORY_ROOT: &str = ".github/prompts";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Where the memory documents live.
    pub memory: MemoryConfig,

    /// How tool calls reach the memory command.
    pub bridge: BridgeConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Memory document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding the three memory documents.
    pub root: PathBuf,
}

/// Selects the command runner used for tool calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BridgeMode {
    /// Spawn the `prompt-memory` command per call.
    #[default]
    Process,

    /// Call the dispatcher inside the server process.
    InProcess,
}

/// Command bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub mode: BridgeMode,

    /// Program spawned in process mode.
    /// If None, the `prompt-memory` binary next to the server is used.
    pub command: Option<PathBuf>,

    /// Upper bound for each captured output stream, in bytes.
    pub max_output_bytes: usize,

    /// Kill the command after this many seconds. None waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_MEMORY_ROOT),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mode: BridgeMode::default(),
            command: None,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "prompt-memory-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            memory: MemoryConfig::default(),
            bridge: BridgeConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_MEMORY_ROOT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(root) = std::env::var(MEMORY_ROOT_ENV) {
            if !root.trim().is_empty() {
                config.memory.root = PathBuf::from(root);
            }
        }

        if let Ok(mode) = std::env::var("MCP_BRIDGE_MODE") {
            match mode.to_lowercase().as_str() {
                "process" => config.bridge.mode = BridgeMode::Process,
                "in-process" | "inprocess" => config.bridge.mode = BridgeMode::InProcess,
                other => warn!("Unknown MCP_BRIDGE_MODE '{}', using process mode", other),
            }
        }

        if let Ok(command) = std::env::var("MCP_BRIDGE_COMMAND") {
            info!("Bridge command set to {}", command);
            config.bridge.command = Some(PathBuf::from(command));
        }

        if let Ok(limit) = std::env::var("MCP_BRIDGE_MAX_OUTPUT") {
            match limit.parse() {
                Ok(limit) => config.bridge.max_output_bytes = limit,
                Err(_) => warn!("Ignoring invalid MCP_BRIDGE_MAX_OUTPUT '{}'", limit),
            }
        }

        if let Ok(secs) = std::env::var("MCP_BRIDGE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.bridge.timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid MCP_BRIDGE_TIMEOUT_SECS '{}'", secs),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const BRIDGE_VARS: [&str; 4] = [
        "MCP_BRIDGE_MODE",
        "MCP_BRIDGE_COMMAND",
        "MCP_BRIDGE_MAX_OUTPUT",
        "MCP_BRIDGE_TIMEOUT_SECS",
    ];

    fn clear_bridge_vars() {
        for var in BRIDGE_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.memory.root, PathBuf::from(".github/prompts"));
        assert_eq!(config.bridge.mode, BridgeMode::Process);
        assert_eq!(config.bridge.max_output_bytes, DEFAULT_MAX_OUTPUT_BYTES);
        assert!(config.bridge.timeout_secs.is_none());
    }

    #[test]
    fn test_memory_root_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(MEMORY_ROOT_ENV, "/tmp/agent-memory");
        }
        let config = Config::from_env();
        assert_eq!(config.memory.root, PathBuf::from("/tmp/agent-memory"));
        unsafe {
            std::env::remove_var(MEMORY_ROOT_ENV);
        }
    }

    #[test]
    fn test_bridge_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_BRIDGE_MODE", "in-process");
            std::env::set_var("MCP_BRIDGE_MAX_OUTPUT", "4096");
            std::env::set_var("MCP_BRIDGE_TIMEOUT_SECS", "30");
        }
        let config = Config::from_env();
        assert_eq!(config.bridge.mode, BridgeMode::InProcess);
        assert_eq!(config.bridge.max_output_bytes, 4096);
        assert_eq!(config.bridge.timeout_secs, Some(30));
        clear_bridge_vars();
    }

    #[test]
    fn test_invalid_bridge_values_fall_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_BRIDGE_MODE", "telepathy");
            std::env::set_var("MCP_BRIDGE_MAX_OUTPUT", "lots");
        }
        let config = Config::from_env();
        assert_eq!(config.bridge.mode, BridgeMode::Process);
        assert_eq!(config.bridge.max_output_bytes, DEFAULT_MAX_OUTPUT_BYTES);
        clear_bridge_vars();
    }
}
