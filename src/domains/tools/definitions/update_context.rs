//! Current task snapshot tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{MemoryTool, collect_arguments};
use crate::domains::memory::{Arguments, Mode};

/// Parameters for the update context tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateContextParams {
    /// Feature/bug/refactor area.
    pub area: Option<String>,

    /// Status label, e.g. active/blocked.
    pub status: Option<String>,

    /// 1-3 sentence human summary of the current task.
    pub summary: String,

    /// Key file paths (comma or space separated).
    pub files: Option<String>,

    /// Pipe-separated bullets for next steps (e.g. 'A|B|C').
    pub next: Option<String>,
}

impl From<UpdateContextParams> for Arguments {
    fn from(params: UpdateContextParams) -> Self {
        collect_arguments([
            ("area", params.area),
            ("status", params.status),
            ("summary", Some(params.summary)),
            ("files", params.files),
            ("next", params.next),
        ])
    }
}

/// Update context tool - sets the current task snapshot.
pub struct UpdateContextTool;

impl MemoryTool for UpdateContextTool {
    const NAME: &'static str = "memory_update_context";
    const DESCRIPTION: &'static str = "Set the current task snapshot in .github/prompts/35_current-task.md (Area, Status, Summary, Key files, Next steps).";
    const MODE: Mode = Mode::UpdateContext;
    type Params = UpdateContextParams;
}
