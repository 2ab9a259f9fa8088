//! Rendering of snapshots and decision entries.

use chrono::{DateTime, TimeZone};

use super::dispatcher::Arguments;

/// Pipe-separated `value` as markdown bullets, or a single placeholder bullet.
fn bullets(value: Option<&str>) -> Vec<String> {
    match value {
        Some(items) => items.split('|').map(|item| format!("- {}", item.trim())).collect(),
        None => vec!["- -".to_string()],
    }
}

fn header<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("## {} — Snapshot", now.format("%Y-%m-%d"))
}

/// Render the current-task snapshot.
pub fn render_context<Tz: TimeZone>(args: &Arguments, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![
        header(now),
        format!("Area: {}", args.get_or("area", "unspecified")),
        format!("Status: {}", args.get_or("status", "active")),
        format!("Summary: {}", args.get_or("summary", "-")),
        format!("Key files: {}", args.get_or("files", "-")),
        "Next steps:".to_string(),
    ];
    lines.extend(bullets(args.get("next")));
    lines.join("\n")
}

/// Render the development status snapshot.
pub fn render_progress<Tz: TimeZone>(args: &Arguments, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![header(now)];
    for (label, key) in [("Done:", "done"), ("Doing:", "doing"), ("Next:", "next")] {
        lines.push(label.to_string());
        lines.extend(bullets(args.get(key)));
    }
    lines.join("\n")
}

/// Fold line breaks into spaces so an entry stays on one line.
fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one decision log entry.
pub fn render_decision<Tz: TimeZone>(args: &Arguments, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} — Decision: {} — Rationale: {} — Links: {}",
        now.format("%Y-%m-%d %H:%M"),
        single_line(args.get_or("decision", "-")),
        single_line(args.get_or("rationale", "-")),
        single_line(args.get_or("links", "-")),
    )
}
