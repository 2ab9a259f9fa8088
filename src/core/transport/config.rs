//! Transport selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The transport the server speaks MCP over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Newline-delimited JSON-RPC on stdin/stdout.
    #[default]
    Stdio,
}

impl TransportConfig {
    /// Read `MCP_TRANSPORT`. Anything but `stdio` is reported and ignored.
    pub fn from_env() -> Self {
        match std::env::var("MCP_TRANSPORT") {
            Ok(value) if !value.trim().is_empty() && !value.trim().eq_ignore_ascii_case("stdio") => {
                warn!("Unsupported MCP_TRANSPORT '{}', using stdio", value);
                Self::Stdio
            }
            _ => Self::Stdio,
        }
    }

    /// Human-readable name for logs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_value(TransportConfig::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "stdio" }));
    }
}
