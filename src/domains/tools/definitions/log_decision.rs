//! Decision log tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{MemoryTool, collect_arguments};
use crate::domains::memory::{Arguments, Mode};

/// Parameters for the log decision tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LogDecisionParams {
    /// Short decision statement.
    pub decision: Option<String>,

    /// Why we chose this, tradeoffs, etc.
    pub rationale: Option<String>,

    /// Issue/PR links or docs (optional).
    pub links: Option<String>,
}

impl From<LogDecisionParams> for Arguments {
    fn from(params: LogDecisionParams) -> Self {
        collect_arguments([
            ("decision", params.decision),
            ("rationale", params.rationale),
            ("links", params.links),
        ])
    }
}

/// Log decision tool - appends one line to the decision log.
pub struct LogDecisionTool;

impl MemoryTool for LogDecisionTool {
    const NAME: &'static str = "memory_log_decision";
    const DESCRIPTION: &'static str =
        "Append a line to 90_decision-log.md capturing a design/architecture decision.";
    const MODE: Mode = Mode::LogDecision;
    type Params = LogDecisionParams;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_links_with_equals_survive() {
        let raw = json!({ "decision": "Use-Redis", "links": "https://x.test/?q=1" });
        let args = LogDecisionTool::arguments(raw.as_object().cloned()).unwrap();

        assert_eq!(args.get("links"), Some("https://x.test/?q=1"));
        assert_eq!(args.get("rationale"), None);
    }

    #[test]
    fn test_non_string_value_is_invalid() {
        let raw = json!({ "decision": 42 });
        assert!(LogDecisionTool::arguments(raw.as_object().cloned()).is_err());
    }
}
