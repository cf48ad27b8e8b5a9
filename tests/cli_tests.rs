//! CLI integration tests that never start a preview server

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    common::artifact_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("__serve").not());
}

#[test]
fn test_version_output() {
    common::artifact_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_empty_home() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No artifacts."));
    assert!(ws.list().is_empty());
}

#[test]
fn test_corrupt_store_reads_as_empty() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(&ws.home).unwrap();
    std::fs::write(ws.home.join("artifacts.json"), "{{ not json").unwrap();

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No artifacts."));
}

#[test]
fn test_legacy_record_is_listed_as_temp() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(&ws.home).unwrap();
    std::fs::write(
        ws.home.join("artifacts.json"),
        r#"[{
            "id": "old123",
            "sourceCode": "export default function Old(){return null}",
            "componentName": "Old",
            "contentDir": "/nonexistent/old123",
            "port": 3000,
            "url": "http://localhost:3000/old123",
            "pid": null,
            "status": "stopped",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }]"#,
    )
    .unwrap();

    let records = ws.list();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["location"], "temp");
    assert!(records[0]["savedPath"].is_null());
    assert_eq!(records[0]["running"], false);
}

#[test]
fn test_unknown_id_fails() {
    let ws = TestWorkspace::new();
    for command in ["open", "update", "save", "unsave", "stop", "clean"] {
        ws.cmd()
            .args([command, "zzzzzz"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Artifact not found: zzzzzz"));
    }
}

#[test]
fn test_create_requires_a_source() {
    let ws = TestWorkspace::new();
    ws.cmd().arg("create").assert().failure();
}

#[test]
fn test_create_missing_file_fails() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["create", "Missing.tsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing.tsx"));
    assert!(ws.list().is_empty());
}

#[test]
fn test_stop_all_with_nothing_running() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["stop", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No running artifacts."));
}

#[test]
fn test_clean_all_with_nothing_to_clean() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["clean", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No artifacts to clean."));
}

#[test]
fn test_completions() {
    common::artifact_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("artifact"));
}
