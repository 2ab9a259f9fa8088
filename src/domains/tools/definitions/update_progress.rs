//! Development status snapshot tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{MemoryTool, collect_arguments};
use crate::domains::memory::{Arguments, Mode};

/// Parameters for the update progress tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateProgressParams {
    /// Pipe-separated list of things finished this iteration.
    pub done: Option<String>,

    /// Pipe-separated list of things currently in progress.
    pub doing: Option<String>,

    /// Pipe-separated list of up-next items.
    pub next: Option<String>,
}

impl From<UpdateProgressParams> for Arguments {
    fn from(params: UpdateProgressParams) -> Self {
        collect_arguments([
            ("done", params.done),
            ("doing", params.doing),
            ("next", params.next),
        ])
    }
}

/// Update progress tool - sets the development status snapshot.
pub struct UpdateProgressTool;

impl MemoryTool for UpdateProgressTool {
    const NAME: &'static str = "memory_update_progress";
    const DESCRIPTION: &'static str =
        "Update development status snapshot in 30_development-status.md (Done, Doing, Next).";
    const MODE: Mode = Mode::UpdateProgress;
    type Params = UpdateProgressParams;
}
