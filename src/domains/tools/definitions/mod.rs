//! Tool definitions module.
//!
//! Each memory tool lives in its own file and implements `MemoryTool`: a name,
//! a description, the command mode it forwards to, and a params struct whose
//! JSON schema is advertised to clients.

pub mod log_decision;
pub mod update_context;
pub mod update_progress;

pub use log_decision::{LogDecisionParams, LogDecisionTool};
pub use update_context::{UpdateContextParams, UpdateContextTool};
pub use update_progress::{UpdateProgressParams, UpdateProgressTool};

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;
use crate::domains::memory::{Arguments, Mode};

/// A tool that forwards its arguments to one memory command mode.
pub trait MemoryTool {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// The command mode this tool runs.
    const MODE: Mode;

    /// Typed parameters; their schema is the tool's input schema.
    type Params: DeserializeOwned + JsonSchema + Into<Arguments> + 'static;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<Self::Params>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Validate raw call arguments and convert them to command arguments.
    fn arguments(raw: Option<JsonObject>) -> Result<Arguments, ToolError> {
        let params: Self::Params =
            serde_json::from_value(serde_json::Value::Object(raw.unwrap_or_default()))
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        Ok(params.into())
    }
}

/// Copy the present fields into `Arguments`; blank values are dropped there.
pub(crate) fn collect_arguments<'a>(
    fields: impl IntoIterator<Item = (&'a str, Option<String>)>,
) -> Arguments {
    let mut args = Arguments::default();
    for (key, value) in fields {
        if let Some(value) = value {
            args.insert(key, value);
        }
    }
    args
}
