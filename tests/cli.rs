//! End-to-end checks of the `prompt-memory` command.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn prompt_memory(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prompt-memory"))
        .args(args)
        .env("MCP_MEMORY_ROOT", root)
        .env_remove("MCP_LOG_LEVEL")
        .output()
        .expect("failed to run prompt-memory")
}

#[test]
fn test_update_context_in_empty_root() {
    let temp_dir = TempDir::new().unwrap();

    let output = prompt_memory(
        temp_dir.path(),
        &[
            "update-context",
            "area=api",
            "status=active",
            "summary=Implement caching",
            "next=A|B",
        ],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Memory prompts updated.\n");

    let text = std::fs::read_to_string(temp_dir.path().join("35_current-task.md")).unwrap();
    assert!(text.starts_with("# Current Task (living)"));
    for expected in ["Area: api", "Status: active", "Summary: Implement caching", "- A", "- B"] {
        assert!(text.contains(expected), "missing {expected:?} in {text}");
    }

    // Every managed document is seeded on first use.
    assert!(temp_dir.path().join("30_development-status.md").exists());
    assert!(temp_dir.path().join("90_decision-log.md").exists());
}

#[test]
fn test_update_context_replaces_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();

    prompt_memory(temp_dir.path(), &["update-context", "summary=First"]);
    let output = prompt_memory(temp_dir.path(), &["update-context", "summary=Second"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(temp_dir.path().join("35_current-task.md")).unwrap();
    assert!(text.contains("Summary: Second"));
    assert!(!text.contains("Summary: First"));
    assert_eq!(text.matches("<!-- mem:current-task:start -->").count(), 1);
}

#[test]
fn test_log_decision_twice_appends_two_lines() {
    let temp_dir = TempDir::new().unwrap();
    let args = ["log-decision", "decision=Use-Redis", "rationale=Speed"];

    assert!(prompt_memory(temp_dir.path(), &args).status.success());
    assert!(prompt_memory(temp_dir.path(), &args).status.success());

    let text = std::fs::read_to_string(temp_dir.path().join("90_decision-log.md")).unwrap();
    let entries: Vec<_> = text
        .lines()
        .filter(|line| line.contains("Decision: Use-Redis — Rationale: Speed"))
        .collect();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_unknown_mode_prints_usage() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("prompts");

    let output = prompt_memory(&root, &["frobnicate", "a=b"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: prompt-memory <mode>"));
    assert!(stderr.contains("update-context | update-progress | log-decision"));
    assert!(!root.exists());
}

#[test]
fn test_missing_mode_prints_usage() {
    let temp_dir = TempDir::new().unwrap();

    let output = prompt_memory(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn test_malformed_section_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("30_development-status.md");
    let broken = "# Development Status (living)\n\n<!-- mem:dev-status:end -->\n<!-- mem:dev-status:start -->\n";
    std::fs::write(&path, broken).unwrap();

    let output = prompt_memory(temp_dir.path(), &["update-progress", "done=x"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_flag_like_mode_prints_usage() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("prompts");

    for mode in ["--bogus", "-x"] {
        let output = prompt_memory(&root, &[mode]);

        assert_eq!(output.status.code(), Some(1), "mode {mode}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage: prompt-memory <mode>"), "mode {mode}: {stderr}");
    }
    assert!(!root.exists());
}
