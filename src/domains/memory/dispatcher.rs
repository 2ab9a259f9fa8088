//! Command dispatch: mode + key/value arguments to a document operation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::documents::{MemoryDocument, MemoryPaths};
use super::error::{MemoryError, MemoryResult};
use super::log::{AppendOutcome, append_line};
use super::section::{UpsertOutcome, upsert};
use super::snapshot::{render_context, render_decision, render_progress};
use super::store;

/// Confirmation printed after a successful update.
pub const UPDATED_MESSAGE: &str = "Memory prompts updated.";

/// The operations the memory command understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    UpdateContext,
    UpdateProgress,
    LogDecision,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::UpdateContext, Mode::UpdateProgress, Mode::LogDecision];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateContext => "update-context",
            Self::UpdateProgress => "update-progress",
            Self::LogDecision => "log-decision",
        }
    }

    /// The document this mode writes to.
    pub fn document(self) -> MemoryDocument {
        match self {
            Self::UpdateContext => MemoryDocument::CurrentTask,
            Self::UpdateProgress => MemoryDocument::DevStatus,
            Self::LogDecision => MemoryDocument::DecisionLog,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| MemoryError::unknown_mode(s))
    }
}

/// Usage text for the direct command.
pub fn usage() -> String {
    let modes: Vec<_> = Mode::ALL.iter().map(|m| m.as_str()).collect();
    format!(
        "Usage: prompt-memory <mode> [k=v …]\nModes: {}",
        modes.join(" | ")
    )
}

/// Key/value arguments with non-empty, trimmed keys and values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    /// Parse `key=value` tokens.
    ///
    /// Only the first `=` separates key from value. Tokens with an empty key or
    /// an empty value are dropped; a repeated key keeps its last value.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::default();
        for token in tokens {
            let (key, value) = token.as_ref().split_once('=').unwrap_or((token.as_ref(), ""));
            args.insert(key, value);
        }
        args
    }

    /// Insert a pair, ignoring it when the key or value is blank.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let key = key.as_ref().trim();
        let value = value.as_ref().trim();
        if !key.is_empty() && !value.is_empty() {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `key=value` command-line tokens.
    pub fn to_tokens(&self) -> Vec<String> {
        self.0.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }
}

/// What a dispatched command did to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Upserted(UpsertOutcome),
    Logged(AppendOutcome),
}

impl DispatchOutcome {
    /// The confirmation line reported to the caller.
    pub fn message(self) -> String {
        match self {
            Self::Logged(AppendOutcome::MarkerMissing) => format!(
                "Memory prompts unchanged: markers for {} not found.",
                MemoryDocument::DecisionLog.marker()
            ),
            _ => UPDATED_MESSAGE.to_string(),
        }
    }
}

/// Runs memory commands against the documents under one root.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    paths: MemoryPaths,
}

impl Dispatcher {
    pub fn new(paths: MemoryPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &MemoryPaths {
        &self.paths
    }

    /// Seed every managed document that does not exist yet.
    pub fn ensure_documents(&self) -> MemoryResult<()> {
        for doc in MemoryDocument::ALL {
            store::ensure(&self.paths.path(doc), &doc.seed())?;
        }
        Ok(())
    }

    /// Run `mode` with the local clock.
    pub fn dispatch(&self, mode: Mode, args: &Arguments) -> MemoryResult<DispatchOutcome> {
        self.dispatch_at(mode, args, &Local::now())
    }

    /// Run `mode` using `now` for every rendered timestamp.
    #[instrument(skip(self, args, now), fields(mode = %mode, args = args.len()))]
    pub fn dispatch_at<Tz: TimeZone>(
        &self,
        mode: Mode,
        args: &Arguments,
        now: &DateTime<Tz>,
    ) -> MemoryResult<DispatchOutcome>
    where
        Tz::Offset: fmt::Display,
    {
        self.ensure_documents()?;

        let doc = mode.document();
        let path = self.paths.path(doc);

        let outcome = match mode {
            Mode::UpdateContext => {
                DispatchOutcome::Upserted(upsert(&path, doc.marker(), &render_context(args, now))?)
            }
            Mode::UpdateProgress => {
                DispatchOutcome::Upserted(upsert(&path, doc.marker(), &render_progress(args, now))?)
            }
            Mode::LogDecision => {
                DispatchOutcome::Logged(append_line(&path, doc.marker(), &render_decision(args, now))?)
            }
        };

        info!("{} on {}: {:?}", mode, path.display(), outcome);
        Ok(outcome)
    }
}
