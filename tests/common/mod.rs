//! Common test utilities for Artifact integration tests

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_cmd::Command;
use tempfile::TempDir;

/// An isolated artifact home plus a project directory to run commands in.
///
/// Dropping it stops every server started from this home.
#[allow(dead_code)]
pub struct TestWorkspace {
    pub temp: TempDir,
    /// Value of ARTIFACT_HOME for commands run through this workspace
    pub home: PathBuf,
    /// Working directory for commands (project root for `save`)
    pub project: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let project = temp.path().join("project");
        std::fs::create_dir_all(&project).expect("Failed to create project directory");
        Self {
            temp,
            home,
            project,
        }
    }

    /// `artifact` command bound to this workspace's home and project
    pub fn cmd(&self) -> Command {
        let mut cmd = artifact_cmd();
        cmd.current_dir(&self.project)
            .env("ARTIFACT_HOME", &self.home)
            .env("ARTIFACT_START_TIMEOUT_MS", "15000")
            .env_remove("ARTIFACT_IDLE_TIMEOUT_SECS")
            .env_remove("ARTIFACT_LOG");
        cmd
    }

    /// Write a file under the project directory
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.project.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Parsed `artifact list --json`
    pub fn list(&self) -> Vec<serde_json::Value> {
        let output = self
            .cmd()
            .args(["list", "--json"])
            .output()
            .expect("Failed to run list");
        assert!(output.status.success(), "list failed: {output:?}");
        serde_json::from_slice(&output.stdout).expect("list --json is not JSON")
    }

    /// Create an inline artifact and return its record as listed
    pub fn create_inline(&self, code: &str) -> serde_json::Value {
        self.cmd()
            .args(["create", "--code", code])
            .assert()
            .success();
        self.list()
            .into_iter()
            .last()
            .expect("created artifact missing from list")
    }

    pub fn artifact_dir(&self, id: &str) -> PathBuf {
        self.home.join("artifacts").join(id)
    }
}

impl Drop for TestWorkspace {
    fn drop(&mut self) {
        if self.home.exists() {
            let _ = self.cmd().args(["stop", "--all"]).output();
        }
    }
}

// `cargo_bin` is deprecated upstream; its replacement macro needs a newer build-dir layout
#[allow(deprecated)]
pub fn artifact_cmd() -> Command {
    Command::cargo_bin("artifact").expect("artifact binary not built")
}

/// Loopback URL of an artifact's preview (avoids resolving `localhost` to ::1)
#[allow(dead_code)]
pub fn preview_url(record: &serde_json::Value, path: &str) -> String {
    format!(
        "http://127.0.0.1:{}{}",
        record["port"].as_u64().expect("port missing"),
        path
    )
}

#[allow(dead_code)]
pub fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
}

/// Whether the server for `record` answers `/__status`
#[allow(dead_code)]
pub fn server_answers(record: &serde_json::Value) -> bool {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .expect("Failed to build HTTP client")
        .get(preview_url(record, "/__status"))
        .send()
        .is_ok_and(|r| r.status().is_success())
}

/// Poll `condition` until it holds or `timeout` passes
#[allow(dead_code)]
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    condition()
}

#[allow(dead_code)]
pub fn component_file(dir: &Path) -> PathBuf {
    dir.join("component.tsx")
}
