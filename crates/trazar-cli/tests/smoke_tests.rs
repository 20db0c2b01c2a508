//! Smoke tests for the trazar CLI
//!
//! These tests verify basic CLI functionality works correctly.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the trazar binary
fn trazar() -> Command {
    Command::cargo_bin("trazar").expect("trazar binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    trazar()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.1"));
}

#[test]
fn test_help_flag() {
    trazar()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("scenarios"));
}

#[test]
fn test_no_args_requires_subcommand() {
    trazar().assert().failure();
}

// ============================================================================
// Generate Tests
// ============================================================================

#[test]
fn test_generate_specific_api_instruction() {
    trazar()
        .args([
            "generate",
            "Send a GET request to https://api.example.com/users",
            "--url",
            "https://api.example.com/users",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("1 test case(s)"));
}

#[test]
fn test_generate_json_output_is_valid() {
    let output = trazar()
        .args([
            "generate",
            "Test the API",
            "--url",
            "https://api.example.com/users",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    assert!(parsed["testCases"].as_array().expect("array").len() > 1);
    assert_eq!(parsed["summary"]["intent"]["primaryType"], "api");
}

#[test]
fn test_generate_writes_script_files() {
    let dir = TempDir::new().expect("temp dir");
    trazar()
        .args([
            "generate",
            "check accessibility",
            "--url",
            "https://example.com",
            "--out-dir",
        ])
        .arg(dir.path())
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("entry").path())
        .collect();
    assert!(!entries.is_empty());
    let content = fs::read_to_string(&entries[0]).expect("script file");
    assert!(content.contains("AxeBuilder"));
    assert!(content.contains("// Generated at "));
}

#[test]
fn test_generate_with_explicit_type_override() {
    trazar()
        .args([
            "generate",
            "check color contrast",
            "--url",
            "https://example.com",
            "--type",
            "security",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"security\""));
}

#[test]
fn test_generate_without_instruction_or_stdin_fails() {
    trazar()
        .args(["generate", "--url", "https://example.com"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no instruction"));
}

#[test]
fn test_generate_reads_stdin() {
    trazar()
        .args(["generate", "--url", "https://example.com"])
        .write_stdin("click Login\nverify the dashboard is visible")
        .assert()
        .success()
        .stdout(predicate::str::contains("functional"));
}

// ============================================================================
// Classify Tests
// ============================================================================

#[test]
fn test_classify_accessibility_text() {
    trazar()
        .args(["classify", "check color contrast and screen reader support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessibility"))
        .stdout(predicate::str::contains("enhanced accessibility parser: on"));
}

#[test]
fn test_classify_json_confidence_in_bounds() {
    let output = trazar()
        .args(["classify", "Send a GET request to /users", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let confidence = parsed["confidence"].as_f64().expect("confidence");
    assert!((0.0..=1.0).contains(&confidence));
}

// ============================================================================
// Scenarios Tests
// ============================================================================

#[test]
fn test_scenarios_lists_catalog() {
    trazar()
        .args(["scenarios"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FN001"))
        .stdout(predicate::str::contains("AP005"))
        .stdout(predicate::str::contains("SC001"));
}

#[test]
fn test_scenarios_filters_by_domain() {
    trazar()
        .args(["scenarios", "--domain", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AP001"))
        .stdout(predicate::str::contains("FN001").not());
}
