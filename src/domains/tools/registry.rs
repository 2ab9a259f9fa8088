//! Tool Registry - central registration of the memory tools.
//!
//! This module provides:
//! - The list of available tools and their metadata
//! - Resolution of a tool call into a command mode and its arguments

use rmcp::model::{JsonObject, Tool};
use tracing::warn;

use super::definitions::{LogDecisionTool, MemoryTool, UpdateContextTool, UpdateProgressTool};
use super::error::ToolError;
use crate::domains::memory::{Arguments, Mode};

type ArgumentParser = fn(Option<JsonObject>) -> Result<Arguments, ToolError>;

struct Registration {
    name: &'static str,
    mode: Mode,
    parse: ArgumentParser,
    tool: fn() -> Tool,
}

fn registration<T: MemoryTool>() -> Registration {
    Registration {
        name: T::NAME,
        mode: T::MODE,
        parse: T::arguments,
        tool: T::to_tool,
    }
}

fn registrations() -> [Registration; 3] {
    [
        registration::<UpdateContextTool>(),
        registration::<UpdateProgressTool>(),
        registration::<LogDecisionTool>(),
    ]
}

/// Tool registry - the single source of truth for the available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        registrations().iter().map(|r| r.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        registrations().iter().map(|r| (r.tool)()).collect()
    }

    /// Resolve a tool call into the command mode and arguments it runs.
    pub fn resolve(name: &str, raw: Option<JsonObject>) -> Result<(Mode, Arguments), ToolError> {
        let Some(entry) = registrations().into_iter().find(|r| r.name == name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        Ok((entry.mode, (entry.parse)(raw)?))
    }
}
