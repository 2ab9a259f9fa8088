//! Delimited section scanning and synchronization.
//!
//! A section is the text between `<!-- {marker}:start -->` and
//! `<!-- {marker}:end -->`. Sections are addressed with first-match semantics:
//! the first start sentinel and the first end sentinel after it form the block.
//! Later copies of the same sentinels are left alone.

use std::path::Path;

use tracing::{debug, instrument, warn};

use super::error::{MemoryError, MemoryResult};
use super::store;

/// The start/end sentinel pair rendered for a marker id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    pub start: String,
    pub end: String,
}

impl Sentinels {
    pub fn new(marker: &str) -> Self {
        Self {
            start: format!("<!-- {marker}:start -->"),
            end: format!("<!-- {marker}:end -->"),
        }
    }

    /// Render a complete block around `body`.
    pub fn wrap(&self, body: &str) -> String {
        format!("{}\n{}\n{}", self.start, body, self.end)
    }
}

/// Byte offsets of a located block.
///
/// `start..end` covers both sentinels; `body_start..body_end` is the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub body_start: usize,
    pub body_end: usize,
    pub end: usize,
}

/// Result of scanning a document for a marker's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockScan {
    /// The first start sentinel is followed by an end sentinel.
    Found(BlockSpan),
    /// At least one of the sentinels does not occur.
    Absent,
    /// Both sentinels occur, but no end sentinel follows the first start.
    Unordered,
}

/// Locate the first block delimited by `sentinels` in `text`.
pub fn scan(text: &str, sentinels: &Sentinels) -> BlockScan {
    let Some(start) = text.find(&sentinels.start) else {
        return BlockScan::Absent;
    };
    let body_start = start + sentinels.start.len();

    match text[body_start..].find(&sentinels.end) {
        Some(offset) => {
            let body_end = body_start + offset;
            BlockScan::Found(BlockSpan {
                start,
                body_start,
                body_end,
                end: body_end + sentinels.end.len(),
            })
        }
        None if text.contains(&sentinels.end) => BlockScan::Unordered,
        None => BlockScan::Absent,
    }
}

/// How an upsert changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing block was replaced in place.
    Replaced,
    /// No block existed; a new one was appended to the end.
    Appended,
}

/// Compute the text produced by installing `content` as the `sentinels` block.
///
/// Returns `None` when the sentinels are unordered.
pub fn upsert_text(
    text: &str,
    sentinels: &Sentinels,
    content: &str,
) -> Option<(String, UpsertOutcome)> {
    let block = sentinels.wrap(content.trim());

    match scan(text, sentinels) {
        BlockScan::Found(span) => {
            if text[span.end..].contains(&sentinels.start) {
                warn!(
                    "Duplicate sentinel {} found, only the first block is updated",
                    sentinels.start
                );
            }
            let mut next = String::with_capacity(text.len() + block.len());
            next.push_str(&text[..span.start]);
            next.push_str(&block);
            next.push_str(&text[span.end..]);
            if !next.ends_with('\n') {
                next.push('\n');
            }
            Some((next, UpsertOutcome::Replaced))
        }
        BlockScan::Absent => {
            let head = text.trim();
            let next = if head.is_empty() {
                format!("{block}\n")
            } else {
                format!("{head}\n\n{block}\n")
            };
            Some((next, UpsertOutcome::Appended))
        }
        BlockScan::Unordered => None,
    }
}

/// Replace or insert the `marker` section of the document at `path`.
///
/// Unordered sentinels are rejected and the file is left untouched.
#[instrument(skip(content), fields(path = %path.display()))]
pub fn upsert(path: &Path, marker: &str, content: &str) -> MemoryResult<UpsertOutcome> {
    let raw = store::read(path)?;
    let sentinels = Sentinels::new(marker);

    let (next, outcome) =
        upsert_text(&raw, &sentinels, content).ok_or_else(|| MemoryError::malformed(marker, path))?;

    store::write_atomic(path, &next)?;
    debug!("Section {} {:?}", marker, outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MARKER: &str = "mem:test";

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_sentinels_render() {
        let s = Sentinels::new("mem:current-task");
        assert_eq!(s.start, "<!-- mem:current-task:start -->");
        assert_eq!(s.end, "<!-- mem:current-task:end -->");
        assert_eq!(
            s.wrap("body"),
            "<!-- mem:current-task:start -->\nbody\n<!-- mem:current-task:end -->"
        );
    }

    #[test]
    fn test_scan_found_offsets() {
        let s = Sentinels::new(MARKER);
        let text = format!("head\n{}\nbody\n{}\ntail\n", s.start, s.end);

        let BlockScan::Found(span) = scan(&text, &s) else {
            panic!("expected block");
        };
        assert_eq!(span.start, 5);
        assert_eq!(&text[span.body_start..span.body_end], "\nbody\n");
        assert_eq!(&text[span.end..], "\ntail\n");
    }

    #[test]
    fn test_scan_absent_when_either_sentinel_missing() {
        let s = Sentinels::new(MARKER);
        assert_eq!(scan("plain text", &s), BlockScan::Absent);
        assert_eq!(scan(&format!("{}\nbody", s.start), &s), BlockScan::Absent);
        assert_eq!(scan(&format!("body\n{}", s.end), &s), BlockScan::Absent);
    }

    #[test]
    fn test_scan_unordered() {
        let s = Sentinels::new(MARKER);
        let text = format!("{}\nbody\n{}\n", s.end, s.start);
        assert_eq!(scan(&text, &s), BlockScan::Unordered);
    }

    #[test]
    fn test_scan_picks_first_block() {
        let s = Sentinels::new(MARKER);
        let text = format!("{}\none\n{}\n{}\ntwo\n{}\n", s.start, s.end, s.start, s.end);

        let BlockScan::Found(span) = scan(&text, &s) else {
            panic!("expected block");
        };
        assert_eq!(&text[span.body_start..span.body_end], "\none\n");
    }

    #[test]
    fn test_upsert_text_appends_to_trimmed_document() {
        let s = Sentinels::new(MARKER);
        let (next, outcome) = upsert_text("# Title\n\n\n", &s, "  content \n").unwrap();

        assert_eq!(outcome, UpsertOutcome::Appended);
        assert_eq!(
            next,
            "# Title\n\n<!-- mem:test:start -->\ncontent\n<!-- mem:test:end -->\n"
        );
    }

    #[test]
    fn test_upsert_text_empty_document() {
        let s = Sentinels::new(MARKER);
        let (next, _) = upsert_text("", &s, "content").unwrap();
        assert_eq!(next, "<!-- mem:test:start -->\ncontent\n<!-- mem:test:end -->\n");
    }

    #[test]
    fn test_upsert_text_preserves_surrounding_text() {
        let s = Sentinels::new(MARKER);
        let text = format!("intro\n\n{}\nold\n{}\n\n  outro  \n", s.start, s.end);

        let (next, outcome) = upsert_text(&text, &s, "new").unwrap();

        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(next, format!("intro\n\n{}\nnew\n{}\n\n  outro  \n", s.start, s.end));
    }

    #[test]
    fn test_upsert_text_only_first_block_changes() {
        let s = Sentinels::new(MARKER);
        let text = format!("{}\none\n{}\n{}\ntwo\n{}\n", s.start, s.end, s.start, s.end);

        let (next, _) = upsert_text(&text, &s, "fresh").unwrap();

        assert_eq!(next, format!("{}\nfresh\n{}\n{}\ntwo\n{}\n", s.start, s.end, s.start, s.end));
    }

    #[test]
    fn test_upsert_text_rejects_unordered() {
        let s = Sentinels::new(MARKER);
        let text = format!("{}\n{}\n", s.end, s.start);
        assert!(upsert_text(&text, &s, "x").is_none());
    }

    #[test]
    fn test_upsert_twice_keeps_single_section() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "# Doc\n\n").unwrap();

        assert_eq!(upsert(&path, MARKER, "first").unwrap(), UpsertOutcome::Appended);
        assert_eq!(upsert(&path, MARKER, "second").unwrap(), UpsertOutcome::Replaced);

        let text = fs::read_to_string(&path).unwrap();
        let s = Sentinels::new(MARKER);
        assert_eq!(count(&text, &s.start), 1);
        assert_eq!(count(&text, &s.end), 1);
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "# Doc\n\nnotes below\n").unwrap();

        upsert(&path, MARKER, "same content").unwrap();
        let first = fs::read_to_string(&path).unwrap();
        upsert(&path, MARKER, "same content").unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(second.ends_with('\n'));
    }

    #[test]
    fn test_upsert_restores_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        let s = Sentinels::new(MARKER);
        fs::write(&path, format!("{}\nold\n{}", s.start, s.end)).unwrap();

        upsert(&path, MARKER, "new").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{}\nnew\n{}\n", s.start, s.end)
        );
    }

    #[test]
    fn test_upsert_malformed_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        let s = Sentinels::new(MARKER);
        let original = format!("{}\nstray\n{}\n", s.end, s.start);
        fs::write(&path, &original).unwrap();

        let result = upsert(&path, MARKER, "new");

        assert!(matches!(result, Err(MemoryError::MalformedSection { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_upsert_independent_markers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "# Doc\n").unwrap();

        upsert(&path, "mem:a", "alpha").unwrap();
        upsert(&path, "mem:b", "beta").unwrap();
        upsert(&path, "mem:a", "alpha two").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<!-- mem:a:start -->\nalpha two\n<!-- mem:a:end -->"));
        assert!(text.contains("<!-- mem:b:start -->\nbeta\n<!-- mem:b:end -->"));
        assert!(text.find("mem:a:start").unwrap() < text.find("mem:b:start").unwrap());
    }
}
