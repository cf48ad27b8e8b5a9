//! Process supervision for preview servers
//!
//! Short-lived CLI invocations start, stop, probe and reload the long-lived preview server of an
//! artifact. There is no direct channel to a running server: the supervisor and the server only
//! share the artifact's runtime directory.
//!
//! - `start` spawns a detached server and waits for it to publish its pid file.
//! - `stop` sends SIGTERM; an already-gone process counts as stopped.
//! - `is_running` probes the recorded pid.
//! - `reload` drops a signal file that the server's watcher picks up eventually.

pub mod process;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::config::Settings;
use crate::domain::ArtifactRecord;
use crate::error::{ArtifactError, Result, file_write_failed, io_error};
use crate::paths;

const TRACING_TARGET: &str = "artifact::supervisor";

/// Hidden subcommand the binary re-executes itself with to become a preview server
pub const SERVE_COMMAND: &str = "__serve";

/// Interval between pid file checks during the start handshake
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Starts, stops, probes and reloads preview server processes
#[derive(Debug, Clone)]
pub struct Supervisor {
    executable: PathBuf,
    idle_timeout: Duration,
    start_timeout: Duration,
    poll_interval: Duration,
}

impl Supervisor {
    pub fn new(executable: PathBuf, idle_timeout: Duration, start_timeout: Duration) -> Self {
        Self {
            executable,
            idle_timeout,
            start_timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Supervisor that spawns the currently running binary
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let executable = std::env::current_exe()
            .map_err(|e| io_error(format!("Failed to locate own executable: {e}")))?;
        Ok(Self::new(
            executable,
            settings.idle_timeout,
            settings.start_timeout,
        ))
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Spawn a detached preview server for `record` and return its pid.
    ///
    /// The server writes its own pid file once it is bound; until that file holds a positive
    /// pid the handshake keeps polling, up to the start timeout.
    pub fn start(&self, record: &ArtifactRecord) -> Result<u32> {
        create_dir(&record.content_dir)?;
        create_dir(&record.runtime_dir)?;

        let pid_file = paths::pid_file(&record.runtime_dir);
        match fs::remove_file(&pid_file) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(file_write_failed(&pid_file, err)),
        }

        let log_path = paths::log_file(&record.runtime_dir);
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| file_write_failed(&log_path, e))?;
        let log_err = log
            .try_clone()
            .map_err(|e| file_write_failed(&log_path, e))?;

        let mut command = Command::new(&self.executable);
        command
            .arg(SERVE_COMMAND)
            .arg("--id")
            .arg(&record.id)
            .arg("--port")
            .arg(record.port.to_string())
            .arg("--content-dir")
            .arg(&record.content_dir)
            .arg("--runtime-dir")
            .arg(&record.runtime_dir)
            .arg("--idle-timeout-secs")
            .arg(self.idle_timeout.as_secs().to_string())
            .current_dir(&record.content_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err));

        process::detach(&mut command);

        let mut child = command.spawn().map_err(|e| ArtifactError::ServerFailed {
            message: format!("Failed to spawn {}: {e}", self.executable.display()),
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            id = %record.id,
            port = record.port,
            spawned_pid = child.id(),
            "preview server spawned"
        );

        let started = Instant::now();
        let deadline = started + self.start_timeout;
        loop {
            if let Some(pid) = read_pid(&pid_file) {
                tracing::info!(
                    target: TRACING_TARGET,
                    id = %record.id,
                    pid,
                    elapsed_ms = started.elapsed().as_millis(),
                    "preview server ready"
                );
                return Ok(pid);
            }

            if let Ok(Some(status)) = child.try_wait() {
                return Err(ArtifactError::ServerFailed {
                    message: format!(
                        "server for {} exited with {status} before it was ready; see {}",
                        record.id,
                        log_path.display()
                    ),
                });
            }

            if Instant::now() >= deadline {
                // Still our direct child; nothing else could stop it later
                if let Err(err) = child.kill().and_then(|()| child.wait().map(drop)) {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        id = %record.id,
                        error = %err,
                        "could not reap timed out preview server"
                    );
                }
                return Err(ArtifactError::SpawnTimeout {
                    id: record.id.clone(),
                    waited_ms: started.elapsed().as_millis(),
                });
            }

            std::thread::sleep(self.poll_interval);
        }
    }

    /// Ask the recorded process to terminate. Signal failures mean it is already gone.
    pub fn stop(&self, record: &ArtifactRecord) {
        let Some(pid) = record.pid else {
            return;
        };

        match process::terminate(pid) {
            Ok(()) => {
                tracing::info!(target: TRACING_TARGET, id = %record.id, pid, "sent SIGTERM");
            }
            Err(err) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    id = %record.id,
                    pid,
                    error = %err,
                    "stop ignored, process already gone"
                );
            }
        }
    }

    /// Whether the recorded pid currently names a live process
    pub fn is_running(&self, record: &ArtifactRecord) -> bool {
        record.pid.is_some_and(process::is_alive)
    }

    /// Write the reload signal file. Delivery to watchers is asynchronous and unacknowledged.
    pub fn reload(&self, record: &ArtifactRecord) -> Result<()> {
        create_dir(&record.runtime_dir)?;

        let signal = paths::reload_file(&record.runtime_dir);
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        fs::write(&signal, stamp.to_string()).map_err(|e| file_write_failed(&signal, e))?;

        tracing::debug!(target: TRACING_TARGET, id = %record.id, "reload signal written");
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| file_write_failed(dir, e))
}

fn read_pid(pid_file: &Path) -> Option<u32> {
    fs::read_to_string(pid_file)
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|pid| *pid > 0)
}
