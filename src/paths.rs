//! On-disk layout of artifact data
//!
//! ```text
//! <home>/artifacts.json                      record store document
//! <home>/artifacts/<id>/component.tsx        ephemeral content
//! <home>/artifacts/<id>/.runtime/server.pid  runtime bookkeeping
//! <home>/artifacts/<id>/.runtime/server.log
//! <home>/artifacts/<id>/.runtime/.reload
//! <project>/.artifact/saved/<id>/component.tsx  persisted content
//! ```

use std::path::{Path, PathBuf};

/// File name of the record store document
pub const STORE_FILE: &str = "artifacts.json";

/// Subdirectory holding one directory per artifact
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Runtime bookkeeping subdirectory inside the ephemeral artifact directory
pub const RUNTIME_DIR: &str = ".runtime";

/// Content file name inside a content directory
pub const COMPONENT_FILE: &str = "component.tsx";

/// Pid handshake file inside the runtime directory
pub const PID_FILE: &str = "server.pid";

/// Server log file inside the runtime directory
pub const LOG_FILE: &str = "server.log";

/// Reload signal file inside the runtime directory
pub const RELOAD_FILE: &str = ".reload";

/// Project-relative root of persisted artifacts
pub const SAVED_DIR: &[&str] = &[".artifact", "saved"];

/// Resolves artifact paths beneath a home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home: PathBuf,
}

impl Layout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn store_file(&self) -> PathBuf {
        self.home.join(STORE_FILE)
    }

    /// Ephemeral directory for `id`; doubles as the temp content directory
    pub fn artifact_dir(&self, id: &str) -> PathBuf {
        self.home.join(ARTIFACTS_DIR).join(id)
    }

    /// Runtime directory for `id`, always under the ephemeral directory
    pub fn runtime_dir(&self, id: &str) -> PathBuf {
        self.artifact_dir(id).join(RUNTIME_DIR)
    }
}

/// Persisted directory for `id` under `project_root`
pub fn saved_dir(project_root: &Path, id: &str) -> PathBuf {
    SAVED_DIR
        .iter()
        .fold(project_root.to_path_buf(), |path, part| path.join(part))
        .join(id)
}

pub fn component_file(content_dir: &Path) -> PathBuf {
    content_dir.join(COMPONENT_FILE)
}

pub fn pid_file(runtime_dir: &Path) -> PathBuf {
    runtime_dir.join(PID_FILE)
}

pub fn log_file(runtime_dir: &Path) -> PathBuf {
    runtime_dir.join(LOG_FILE)
}

pub fn reload_file(runtime_dir: &Path) -> PathBuf {
    runtime_dir.join(RELOAD_FILE)
}
