//! Append-only log regions.
//!
//! A log region is a section whose interior is a list of lines. Appending
//! keeps every prior line in place and adds the new one at the bottom.

use std::path::Path;

use tracing::{instrument, warn};

use super::error::MemoryResult;
use super::section::{BlockScan, Sentinels, scan};
use super::store;

/// Whether an append reached the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// The region was not found; the document was not written.
    MarkerMissing,
}

/// Compute the text produced by appending `line` inside the `sentinels` region.
///
/// Returns `None` when there is no well-formed region.
pub fn append_text(text: &str, sentinels: &Sentinels, line: &str) -> Option<String> {
    let BlockScan::Found(span) = scan(text, sentinels) else {
        return None;
    };

    let existing = text[span.body_start..span.body_end].trim();
    let body = if existing.is_empty() {
        line.to_string()
    } else {
        format!("{existing}\n{line}")
    };

    let mut next = String::with_capacity(text.len() + line.len() + 1);
    next.push_str(&text[..span.start]);
    next.push_str(&sentinels.wrap(&body));
    next.push_str(&text[span.end..]);
    Some(next)
}

/// Append `line` inside the `marker` region of the document at `path`.
///
/// A document without the region is left byte-for-byte unchanged.
#[instrument(skip(line), fields(path = %path.display()))]
pub fn append_line(path: &Path, marker: &str, line: &str) -> MemoryResult<AppendOutcome> {
    let raw = store::read(path)?;
    let sentinels = Sentinels::new(marker);

    match append_text(&raw, &sentinels, line) {
        Some(next) => {
            store::write_atomic(path, &next)?;
            Ok(AppendOutcome::Appended)
        }
        None => {
            warn!("Markers for {} not found, nothing appended", marker);
            Ok(AppendOutcome::MarkerMissing)
        }
    }
}
