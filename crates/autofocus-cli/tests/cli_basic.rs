//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against throwaway scenario
//! files and verify outputs. Every command takes `--now` explicitly, so
//! results are deterministic.

use std::path::PathBuf;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "autofocus-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Write a scenario file into the temp dir and return its path.
fn write_scenario(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("autofocus-cli-{name}.toml"));
    std::fs::write(&path, body).expect("Failed to write scenario file");
    path
}

const GRAPH_SCENARIO: &str = r#"
[[intervals]]
start = "2026-08-24T09:00:00Z"
end = "2026-08-24T09:30:00Z"
tags = ["creating"]
"#;

const SCHEDULE_SCENARIO: &str = r#"
[[schedules]]
id = "sched-1"
workflow_id = "wf-1"
workflow_name = "Deep Work"
scheduled_time = "2026-08-24T09:00:00Z"
recurrence = "daily"
"#;

const TRIGGER_SCENARIO: &str = r#"
[[intervals]]
start = "2026-08-24T13:30:00Z"
end = "2026-08-24T14:00:00Z"
tags = ["consuming"]

[[sessions]]
id = "sess-1"
workflow_id = "wf-1"
start = "2026-08-24T11:00:00Z"
end = "2026-08-24T12:00:00Z"
"#;

#[test]
fn test_help() {
    let (_, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "Help failed");
}

#[test]
fn test_graph_hourly_json() {
    let path = write_scenario("graph", GRAPH_SCENARIO);
    let (stdout, stderr, code) = run_cli(&[
        "graph",
        "hourly",
        "--scenario",
        path.to_str().unwrap(),
        "--date",
        "2026-08-24",
        "--now",
        "2026-08-25T00:00:00Z",
        "--json",
    ]);
    assert_eq!(code, 0, "Graph hourly failed: {stderr}");

    let graph: serde_json::Value =
        serde_json::from_str(&stdout).expect("Graph output is not JSON");
    let buckets = graph.as_array().expect("Expected JSON array");
    assert_eq!(buckets.len(), 24);
    assert_eq!(buckets[9]["creating"], 30.0);
    assert_eq!(buckets[9]["offline"], 30.0);
}

#[test]
fn test_schedule_next() {
    let path = write_scenario("schedule-next", SCHEDULE_SCENARIO);
    let (stdout, stderr, code) = run_cli(&[
        "schedule",
        "next",
        "--scenario",
        path.to_str().unwrap(),
        "--now",
        "2026-08-24T08:00:00Z",
    ]);
    assert_eq!(code, 0, "Schedule next failed: {stderr}");
    assert!(stdout.contains("2026-08-24T09:00:00"), "Got: {stdout}");
}

#[test]
fn test_schedule_poll_reminder_and_start() {
    let path = write_scenario("schedule-poll", SCHEDULE_SCENARIO);
    let (stdout, stderr, code) = run_cli(&[
        "schedule",
        "poll",
        "--scenario",
        path.to_str().unwrap(),
        "--from",
        "2026-08-24T08:40:00Z",
        "--minutes",
        "25",
    ]);
    assert_eq!(code, 0, "Schedule poll failed: {stderr}");
    assert!(stdout.contains("reminder"), "Got: {stdout}");
    assert!(stdout.contains("start"), "Got: {stdout}");
    assert!(stdout.contains("2 action(s)"), "Got: {stdout}");
}

#[test]
fn test_trigger_check_doomscroll() {
    let path = write_scenario("trigger", TRIGGER_SCENARIO);
    let (stdout, stderr, code) = run_cli(&[
        "trigger",
        "check",
        "--scenario",
        path.to_str().unwrap(),
        "--now",
        "2026-08-24T14:00:00Z",
    ]);
    assert_eq!(code, 0, "Trigger check failed: {stderr}");
    assert!(stdout.contains("doomscroll"), "Got: {stdout}");
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("autofocus-cli"));
}
