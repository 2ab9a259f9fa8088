//! Memory tool router.
//!
//! Turns an MCP tool call into a memory command run by the configured
//! `CommandRunner` and wraps the outcome in a `CallToolResult`. Failures of a
//! single call, including unknown tool names, come back as error-flagged
//! results so the server keeps serving.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use crate::domains::bridge::CommandRunner;

#[derive(Clone)]
pub struct MemoryToolRouter {
    runner: Arc<dyn CommandRunner>,
}

impl MemoryToolRouter {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// Run the tool `name` with `arguments`.
    #[instrument(skip(self, arguments), fields(runner = %self.runner.name()))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!("Tool called: {}", name);

        match self.run(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                CallToolResult::error(vec![Content::text(format!(
                    "Error while running {}: {}",
                    name, e
                ))])
            }
        }
    }

    async fn run(&self, name: &str, arguments: Option<JsonObject>) -> Result<String, ToolError> {
        let (mode, args) = ToolRegistry::resolve(name, arguments)?;
        Ok(self.runner.run(mode, &args).await?)
    }
}
