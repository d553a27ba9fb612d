//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("schemaform").expect("binary should exist")
}

fn nullable_schema() -> String {
    serde_json::json!({
        "type": "object",
        "properties": {
            "port": { "type": ["integer", "null"] },
            "mode": { "anyOf": [{ "const": "fast" }, { "const": "safe" }] }
        }
    })
    .to_string()
}

// ── Normalize ───────────────────────────────────────────────────────────────

#[test]
fn test_normalize_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(&input, nullable_schema()).unwrap();

    cmd()
        .args(["normalize", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enum\""))
        .stdout(predicate::str::contains("\"integer\""));
}

#[test]
fn test_normalize_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    let output = dir.path().join("out.json");
    fs::write(&input, nullable_schema()).unwrap();

    cmd()
        .args(["normalize", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("output file should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("output should be valid JSON");
    assert_eq!(parsed["properties"]["port"]["type"], "integer");
    assert_eq!(
        parsed["properties"]["mode"]["enum"],
        serde_json::json!(["fast", "safe"])
    );
}

#[test]
fn test_normalize_warns_on_unsupported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(
        &input,
        serde_json::json!({
            "type": "object",
            "properties": {
                "hooks": { "anyOf": [{ "type": "object" }, { "type": "array" }] }
            }
        })
        .to_string(),
    )
    .unwrap();

    cmd()
        .args(["normalize", input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("hooks"));
}

// ── Diff ────────────────────────────────────────────────────────────────────

#[test]
fn test_diff_reports_leaf_changes_sorted() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("a.json");
    let current = dir.path().join("b.json");
    fs::write(&original, r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
    fs::write(&current, r#"{"a": 1, "b": {"c": 3}, "d": 4}"#).unwrap();

    let output = cmd()
        .args([
            "diff",
            original.to_str().unwrap(),
            current.to_str().unwrap(),
            "--format",
            "compact",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let changes: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let paths: Vec<&str> = changes
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["b.c", "d"]);
}

#[test]
fn test_diff_identical_files_is_empty() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("a.json");
    let current = dir.path().join("b.json");
    fs::write(&original, r#"{"a": {"b": [1, 2]}}"#).unwrap();
    fs::write(&current, r#"{"a": {"b": [1, 2]}}"#).unwrap();

    cmd()
        .args([
            "diff",
            original.to_str().unwrap(),
            current.to_str().unwrap(),
            "--format",
            "compact",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

// ── Defaults ────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_for_object_schema() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(&input, r#"{"type": ["object", "null"]}"#).unwrap();

    cmd()
        .args(["defaults", input.to_str().unwrap(), "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{}"));
}

#[test]
fn test_defaults_honors_explicit_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(&input, r#"{"type": "integer", "default": 7}"#).unwrap();

    cmd()
        .args(["defaults", input.to_str().unwrap(), "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("7"));
}

// ── Search ──────────────────────────────────────────────────────────────────

#[test]
fn test_search_lists_matching_paths() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bundle.json");
    fs::write(
        &input,
        serde_json::json!({
            "schema": {
                "type": "object",
                "properties": {
                    "gateway": {
                        "type": "object",
                        "properties": {
                            "port": { "type": "integer" },
                            "host": { "type": "string" }
                        }
                    }
                }
            },
            "uiHints": { "gateway.port": { "label": "Listen port" } },
            "version": "1",
            "generatedAt": "2026-02-03T10:00:00Z"
        })
        .to_string(),
    )
    .unwrap();

    cmd()
        .args(["search", input.to_str().unwrap(), "listen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gateway\n"))
        .stdout(predicate::str::contains("gateway.port"))
        .stdout(predicate::str::contains("gateway.host").not());
}

// ── Error handling ──────────────────────────────────────────────────────────

#[test]
fn test_missing_input_file_fails() {
    cmd()
        .args(["normalize", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{not json").unwrap();

    cmd()
        .args(["diff", input.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}
