//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

const DATE: &str = "2024-06-03";

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_on(data_dir, DATE, args)
}

/// Run a CLI command planning for `date`.
fn run_cli_on(data_dir: &Path, date: &str, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayweather"))
        .env("DAYWEATHER_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .args(["--date", date])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_ok_on(data_dir: &Path, date: &str, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli_on(data_dir, date, args);
    assert_eq!(code, 0, "{args:?} on {date} failed: {stderr}");
    stdout
}

fn status_json(data_dir: &Path) -> serde_json::Value {
    let stdout = run_ok(data_dir, &["status", "--json"]);
    serde_json::from_str(&stdout).expect("status --json is not JSON")
}

#[test]
fn test_fresh_status_asks_for_energy() {
    let dir = tempfile::tempdir().unwrap();
    let status = status_json(dir.path());
    assert_eq!(status["guidance"]["action"], "set energy");
    assert_eq!(status["capacity"]["can_add_task"], false);
    assert_eq!(status["hard_stop"], "18:00");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_energy_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["energy", "set", "steady"]);
    assert!(out.contains("Energy set: steady"));
    assert!(out.contains("Capacity today: 3"));

    let out = run_ok(dir.path(), &["energy", "show"]);
    assert!(out.starts_with("steady:"));

    run_ok(dir.path(), &["energy", "clear"]);
    let out = run_ok(dir.path(), &["energy", "show"]);
    assert!(out.contains("No energy set"));
}

#[test]
fn test_energy_rejects_unknown_level() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["energy", "set", "sunny"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("sunny"));
}

#[test]
fn test_focus_task_needs_energy() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "add", "write essay"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No focus capacity left"));

    // Life tasks never need capacity.
    run_ok(dir.path(), &["task", "add", "laundry", "--life"]);
}

#[test]
fn test_capacity_fills_up() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["energy", "set", "steady"]);
    run_ok(dir.path(), &["task", "add", "draft proposal", "--complexity", "deep"]);

    let status = status_json(dir.path());
    assert_eq!(status["capacity"]["used_capacity"], 2.0);
    assert_eq!(status["capacity"]["remaining_capacity"], 1.0);
    assert_eq!(status["capacity"]["recommended_complexity"], "medium");

    run_ok(dir.path(), &["task", "add", "reply to Sam", "-c", "medium"]);
    let (code, _, _) = run_cli(dir.path(), &["task", "add", "one more", "-c", "quick"]);
    assert_eq!(code, 1);
}

#[test]
fn test_task_done_celebrates() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["energy", "set", "flowing"]);
    run_ok(dir.path(), &["task", "add", "tidy inbox", "-c", "quick"]);

    let list = run_ok(dir.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    run_ok(dir.path(), &["task", "done", &id[..8]]);
    let status = status_json(dir.path());
    assert_eq!(status["guidance"]["type"], "celebrate");
    assert!(status["guidance"]["action"].is_null());

    run_ok(dir.path(), &["task", "toggle", &id]);
    run_ok(dir.path(), &["task", "remove", &id]);
    let list = run_ok(dir.path(), &["task", "list"]);
    assert!(list.contains("No tasks"));
}

#[test]
fn test_unknown_task_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "done", "deadbeef"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no task matching"));
}

#[test]
fn test_stop_set_validates() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["stop", "set", "16:30"]);
    assert_eq!(status_json(dir.path())["hard_stop"], "16:30");

    let (code, _, _) = run_cli(dir.path(), &["stop", "set", "4pm"]);
    assert_ne!(code, 0);
}

#[test]
fn test_barrier_and_reflection() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["barrier", "add", "construction noise"]);
    let out = run_ok(dir.path(), &["barrier", "list"]);
    assert!(out.contains("construction noise"));

    run_ok(dir.path(), &["reflect", "write", "took a walk", "noisy", "--rating", "4"]);
    let out = run_ok(dir.path(), &["reflect", "show"]);
    assert!(out.contains("took a walk"));
    assert!(out.contains("4/5"));

    let (code, _, _) = run_cli(dir.path(), &["reflect", "write", "x", "--rating", "9"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "day.hard_stop"]).trim(), "18:00");

    run_ok(dir.path(), &["config", "set", "day.hard_stop", "17:00"]);
    assert_eq!(status_json(dir.path())["hard_stop"], "17:00");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "capacity.resting", "1"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);

    run_ok(dir.path(), &["config", "reset"]);
    run_ok(dir.path(), &["config", "list"]);
}

#[test]
fn test_future_day_has_not_started() {
    let dir = tempfile::tempdir().unwrap();
    let future = "2099-01-01";
    run_ok_on(dir.path(), future, &["energy", "set", "steady"]);
    run_ok_on(dir.path(), future, &["task", "add", "future work", "-c", "quick"]);
    run_ok_on(dir.path(), future, &["stop", "set", "09:30"]);

    let stdout = run_ok_on(dir.path(), future, &["status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["time"]["is_past_stop"], false);
    assert_eq!(status["time"]["total_minutes"], 570);
    assert_eq!(status["time"]["message"], "9h 30m left");
    assert_eq!(status["guidance"]["type"], "none");

    let out = run_ok_on(dir.path(), future, &["stop", "show"]);
    assert!(out.contains("9h 30m left"));
}

#[test]
fn test_past_day_is_over() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["energy", "set", "steady"]);
    run_ok(dir.path(), &["task", "add", "old work", "-c", "quick"]);
    run_ok(dir.path(), &["stop", "set", "23:59"]);

    let status = status_json(dir.path());
    assert_eq!(status["time"]["is_past_stop"], true);
    assert_eq!(status["time"]["message"], "Past your hard stop");
    assert_eq!(status["guidance"]["type"], "rest_now");
}

#[test]
fn test_barrier_links_task_by_prefix() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["task", "add", "call the bank", "--life"]);
    let list = run_ok(dir.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    run_ok(dir.path(), &["barrier", "add", "hold music", "--task", &id[..8]]);
    let out = run_ok(dir.path(), &["barrier", "list", "--json"]);
    let barriers: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(barriers[0]["task_id"], id.as_str());

    let (code, _, stderr) = run_cli(dir.path(), &["barrier", "add", "x", "--task", "zzzz"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no task matching"));
}

#[test]
fn test_unreadable_config_warning_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[capacity]\nresting = 1.0\n").unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("config unreadable"), "stderr: {stderr}");
}
