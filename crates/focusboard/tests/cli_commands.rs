mod common;

use common::{sample_records, write_store};
use std::process::{Command, Output};
use tempfile::TempDir;

fn focusboard(home: &TempDir, data_file: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_focusboard"))
        .args(args)
        .env("HOME", home.path())
        .env("FOCUSBOARD_DATA_FILE", data_file)
        .env_remove("FOCUSBOARD_RELAY_TOKEN")
        .output()
        .unwrap()
}

#[test]
fn test_view_prints_json() {
    let home = TempDir::new().unwrap();
    let store = write_store(home.path(), &sample_records());

    let output = focusboard(
        &home,
        store.path(),
        &["view", "--goal", "write", "--chart", "goal_distribution"],
    );
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["no_data"], false);
    assert_eq!(view["aggregate"]["total_sessions"], 2);
    assert_eq!(view["charts"][0]["name"], "goal_distribution");
}

#[test]
fn test_view_no_data_flag() {
    let home = TempDir::new().unwrap();
    let store = write_store(home.path(), &sample_records());

    let output = focusboard(&home, store.path(), &["view", "--search", "nothing like this"]);
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["no_data"], true);
    assert!(view.get("aggregate").is_none());
}

#[test]
fn test_unknown_chart_fails() {
    let home = TempDir::new().unwrap();
    let store = write_store(home.path(), &sample_records());

    let output = focusboard(&home, store.path(), &["view", "--chart", "pie"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("pie"));
}

#[test]
fn test_export_writes_file() {
    let home = TempDir::new().unwrap();
    let store = write_store(home.path(), &sample_records());
    let target = home.path().join("out").join("report.txt");

    let output = focusboard(
        &home,
        store.path(),
        &[
            "export",
            "--format",
            "document",
            "--output",
            target.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    let text = std::fs::read_to_string(&target).unwrap();
    assert!(text.starts_with("Focus Session Report"));
}

#[test]
fn test_send_without_relay_fails() {
    let home = TempDir::new().unwrap();
    let store = write_store(home.path(), &sample_records());

    let output = focusboard(&home, store.path(), &["send", "--to", "me@example.com"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("relay_url"));
}
