//! Command helper utilities
//!
//! [`Context`] bundles what every orchestrator needs: settings, on-disk layout, the record store
//! and the supervisor.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::config::Settings;
use crate::domain::ArtifactRecord;
use crate::error::{Result, io_error};
use crate::location::Migrator;
use crate::paths::Layout;
use crate::port;
use crate::progress::Spinner;
use crate::store::ArtifactStore;
use crate::supervisor::Supervisor;

const TRACING_TARGET: &str = "artifact::commands";

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LENGTH: usize = 6;

/// Budget for a `/__status` probe; listing must stay snappy with dead servers around
const STATUS_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Context {
    pub settings: Settings,
    pub layout: Layout,
    pub store: ArtifactStore,
    pub supervisor: Supervisor,
}

impl Context {
    /// Context for the current invocation, resolved from the environment
    pub fn load() -> Result<Self> {
        let settings = Settings::from_env();
        let supervisor = Supervisor::from_settings(&settings)?;
        Ok(Self::new(settings, supervisor))
    }

    pub fn new(settings: Settings, supervisor: Supervisor) -> Self {
        let layout = Layout::new(settings.home.clone());
        let store = ArtifactStore::open(&layout);
        Self {
            settings,
            layout,
            store,
            supervisor,
        }
    }

    pub fn migrator(&self) -> Migrator<'_> {
        Migrator::new(&self.layout, &self.store, &self.supervisor)
    }

    /// Start `record`'s server and persist the outcome. A failed start is saved with
    /// `status = error` before the error is returned.
    pub fn launch(&self, record: &mut ArtifactRecord) -> Result<()> {
        let spinner = Spinner::start(format!("Starting preview server for {}", record.id));
        let started = self.supervisor.start(record);
        spinner.finish();

        match started {
            Ok(pid) => {
                record.mark_running(pid);
                self.store.save(record)
            }
            Err(err) => {
                record.pid = None;
                record.mark_error();
                if let Err(save_err) = self.store.save(record) {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        id = %record.id,
                        error = %save_err,
                        "could not record failed start"
                    );
                }
                Err(err)
            }
        }
    }

    /// Restart a stopped artifact, preferring the port it had before
    pub fn relaunch(&self, record: &mut ArtifactRecord) -> Result<()> {
        let port = port::allocate(Some(record.port))?;
        if port != record.port {
            tracing::debug!(
                target: TRACING_TARGET,
                id = %record.id,
                old = record.port,
                new = port,
                "previous port taken"
            );
            record.set_port(port);
        }
        self.launch(record)
    }

    /// A fresh id not present in the store
    pub fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LENGTH)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if self.store.find_by_id(&id).is_none() {
                return id;
            }
        }
    }
}

/// Current working directory, the project root for saved artifacts
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| io_error(format!("Failed to get current directory: {e}")))
}

#[derive(Deserialize)]
struct StatusBody {
    watchers: usize,
}

/// Client for `/__status` probes
pub fn status_client() -> Option<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(STATUS_TIMEOUT)
        .build()
        .map_err(|e| {
            tracing::debug!(target: TRACING_TARGET, error = %e, "status client unavailable");
        })
        .ok()
}

/// Watcher count reported by the server on `port`, if it answers in time
pub fn fetch_watchers(client: &reqwest::blocking::Client, port: u16) -> Option<usize> {
    let url = format!("http://127.0.0.1:{port}/__status");
    let response = client.get(&url).send().ok()?.error_for_status().ok()?;
    response.json::<StatusBody>().ok().map(|body| body.watchers)
}

/// Launch the platform's URL opener. Failures are logged only.
pub fn open_browser(url: &str) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };

    let spawned = command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    if let Err(err) = spawned {
        tracing::warn!(target: TRACING_TARGET, url, error = %err, "could not open browser");
    }
}
