//! The managed memory documents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::section::Sentinels;

/// One of the three documents maintained under the memory root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryDocument {
    CurrentTask,
    DevStatus,
    DecisionLog,
}

impl MemoryDocument {
    pub const ALL: [MemoryDocument; 3] = [
        MemoryDocument::CurrentTask,
        MemoryDocument::DevStatus,
        MemoryDocument::DecisionLog,
    ];

    /// File name relative to the memory root.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::CurrentTask => "35_current-task.md",
            Self::DevStatus => "30_development-status.md",
            Self::DecisionLog => "90_decision-log.md",
        }
    }

    /// Marker id of the section this document carries.
    pub fn marker(self) -> &'static str {
        match self {
            Self::CurrentTask => "mem:current-task",
            Self::DevStatus => "mem:dev-status",
            Self::DecisionLog => "mem:decision-log",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CurrentTask => "Current Task",
            Self::DevStatus => "Development Status",
            Self::DecisionLog => "Decision Log",
        }
    }

    /// Content written when the document does not exist yet.
    ///
    /// The decision log is seeded with an empty region, since appends never
    /// create one.
    pub fn seed(self) -> String {
        match self {
            Self::CurrentTask => "# Current Task (living)".to_string(),
            Self::DevStatus => "# Development Status (living)".to_string(),
            Self::DecisionLog => format!(
                "# Decision Log (append-only)\n\n{}",
                Sentinels::new(self.marker()).wrap("")
            ),
        }
    }

    /// URI under which the document is exposed as an MCP resource.
    pub fn uri(self) -> &'static str {
        match self {
            Self::CurrentTask => "memory://current-task",
            Self::DevStatus => "memory://dev-status",
            Self::DecisionLog => "memory://decision-log",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CurrentTask => {
                "Current task snapshot: area, status, summary, key files, next steps"
            }
            Self::DevStatus => "Development status snapshot: done, doing, next",
            Self::DecisionLog => "Append-only log of design and architecture decisions",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|doc| doc.uri() == uri)
    }
}

/// Resolves memory documents to paths under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPaths {
    root: PathBuf,
}

impl MemoryPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, doc: MemoryDocument) -> PathBuf {
        self.root.join(doc.file_name())
    }
}
