//! End-to-end tests for the `overdue` binary
//!
//! Each test runs the real binary against a throwaway home directory.

use std::path::Path;
use std::process::{Command, Output};

fn overdue(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_overdue"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("OVERDUE_PROFILE")
        .env_remove("OVERDUE_DEBUG")
        .output()
        .expect("Failed to run overdue")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn list_json(home: &Path, extra: &[&str]) -> Vec<serde_json::Value> {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let output = overdue(home, &args);
    assert!(output.status.success(), "list failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("list --json prints a JSON array")
}

#[test]
fn add_done_remove_lifecycle() {
    let temp = tempfile::TempDir::new().unwrap();
    let home = temp.path();

    let output = overdue(home, &["add", "water plants", "--min", "2d", "--max", "1w"]);
    assert!(output.status.success(), "add failed: {:?}", output);
    assert!(stdout(&output).contains("✓ Added task"));

    let tasks = list_json(home, &[]);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "water plants");
    assert_eq!(tasks[0]["min_threshold"], 172_800);
    assert_eq!(tasks[0]["max_threshold"], 604_800);
    assert_eq!(tasks[0]["phase"], "fresh");
    assert_eq!(tasks[0]["color"], "#90ee90");
    assert_eq!(tasks[0]["profile"], "default");

    let output = overdue(home, &["done", "water plants"]);
    assert!(output.status.success(), "done failed: {:?}", output);
    assert!(stdout(&output).contains("'water plants' has been reset! Success count: 1"));

    let id = tasks[0]["id"].as_str().unwrap();
    let output = overdue(home, &["reset", &id[..8]]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Success count: 2"));

    let output = overdue(home, &["remove", "water plants", "-y"]);
    assert!(output.status.success(), "remove failed: {:?}", output);
    assert!(list_json(home, &[]).is_empty());
}

#[test]
fn add_rejects_invalid_thresholds() {
    let temp = tempfile::TempDir::new().unwrap();
    let home = temp.path();

    let output = overdue(home, &["add", "gym", "--min", "3d", "--max", "1d"]);
    assert!(!output.status.success());

    let output = overdue(home, &["add", "gym", "--min", "soon", "--max", "1d"]);
    assert!(!output.status.success());

    let output = overdue(home, &["add", "  ", "--min", "1d", "--max", "2d"]);
    assert!(!output.status.success());

    assert!(list_json(home, &[]).is_empty());
}

#[test]
fn unknown_task_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = overdue(temp.path(), &["done", "nothing-here"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Task not found"));
}

#[test]
fn profiles_keep_tasks_apart() {
    let temp = tempfile::TempDir::new().unwrap();
    let home = temp.path();

    assert!(overdue(home, &["profile", "create", "work"]).status.success());
    assert!(overdue(home, &["-p", "work", "add", "timesheet", "--min", "5d", "--max", "7d"])
        .status
        .success());
    assert!(overdue(home, &["add", "dishes", "--min", "12h", "--max", "1d"])
        .status
        .success());

    let work = list_json(home, &["-p", "work"]);
    assert_eq!(work.len(), 1);
    assert_eq!(work[0]["name"], "timesheet");

    let all = list_json(home, &["--all"]);
    assert_eq!(all.len(), 2);

    assert!(overdue(home, &["profile", "default", "work"]).status.success());
    let output = overdue(home, &["profile", "default"]);
    assert!(stdout(&output).contains("Default profile: work"));
    assert_eq!(list_json(home, &[])[0]["name"], "timesheet");
}

#[test]
fn color_command_prints_gradient_point() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = overdue(temp.path(), &["color", "200", "--min", "100", "--max", "300"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("#ff0000"));
    assert!(out.contains("critical"));

    let output = overdue(temp.path(), &["color", "1", "--min", "5", "--max", "5"]);
    assert!(!output.status.success());
}
