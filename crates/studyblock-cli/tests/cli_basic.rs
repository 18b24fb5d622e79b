//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory (STUDYBLOCK_ENV=dev).

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studyblock-cli", "--"])
        .args(args)
        .env("STUDYBLOCK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Timer control"));
    assert!(stdout.contains("history"));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list not JSON");
    assert!(parsed.get("timer").is_some());
    assert!(parsed.get("notifications").is_some());
}

#[test]
fn test_config_set_and_get() {
    let (stdout, _, code) = run_cli(&["config", "set", "timer.study_minutes", "30"]);
    assert_eq!(code, 0, "config set failed");
    assert!(stdout.contains("timer.study_minutes = 30"));
    let (stdout, _, code) = run_cli(&["config", "get", "timer.study_minutes"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "30");
    let _ = run_cli(&["config", "reset"]);
}

#[test]
fn test_config_path_points_at_toml() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_config_reset_reports_path() {
    let (stdout, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0, "config reset failed");
    assert!(stdout.contains("config reset to defaults at"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "timer.no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_timer_status_is_json() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("status not JSON");
    assert!(parsed.get("recorded_sessions").is_some());
    assert!(parsed.get("total_study_seconds").is_some());
}

#[test]
fn test_history_list_runs() {
    let (_, _, code) = run_cli(&["history", "list"]);
    assert_eq!(code, 0, "history list failed");
    let (stdout, _, code) = run_cli(&["history", "list", "--json"]);
    assert_eq!(code, 0, "history list --json failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_history_subjects_include_general() {
    let (stdout, _, code) = run_cli(&["history", "subjects"]);
    assert_eq!(code, 0, "history subjects failed");
    assert!(stdout.lines().any(|line| line.trim() == "General"));
}

#[test]
fn test_tips_output() {
    let (stdout, _, code) = run_cli(&["tips"]);
    assert_eq!(code, 0, "tips failed");
    assert!(stdout.contains("Time Management"));
    assert!(stdout.contains("Exam Day"));
}
