//! Preview server process
//!
//! One process per running artifact, started by the supervisor through the hidden `__serve`
//! command. It serves the preview document, streams reload events, watches for changes and
//! exits on its own once nobody has been watching for the idle timeout.
//!
//! Everything runs on a single-threaded tokio runtime; analysis and rendering are pushed to the
//! blocking pool so they never stall event delivery.

pub mod pages;
pub mod routes;
pub mod state;
pub mod watch;

use std::fs;
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::{ArtifactError, Result, file_write_failed};
use crate::paths;

pub use state::ServerState;

const TRACING_TARGET_STARTUP: &str = "artifact::server::startup";
const TRACING_TARGET_SHUTDOWN: &str = "artifact::server::shutdown";

/// Startup parameters handed over by the supervisor
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub id: String,
    pub port: u16,
    pub content_dir: PathBuf,
    pub runtime_dir: PathBuf,
    pub idle_timeout: Duration,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}

/// Run the preview server until idle expiry or a termination signal
pub fn run(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ArtifactError::ServerFailed {
            message: format!("Failed to build runtime: {e}"),
        })?;

    runtime.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<()> {
    fs::create_dir_all(&config.runtime_dir)
        .map_err(|e| file_write_failed(&config.runtime_dir, e))?;

    let listener = TcpListener::bind(config.addr())
        .await
        .map_err(|e| ArtifactError::ServerFailed {
            message: format!("Failed to bind {}: {e}", config.addr()),
        })?;

    let pid_file = paths::pid_file(&config.runtime_dir);
    write_pid_file(&pid_file, std::process::id())?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        id = %config.id,
        pid = std::process::id(),
        url = %format!("http://localhost:{}/{}", config.port, config.id),
        idle_secs = config.idle_timeout.as_secs(),
        "preview server listening"
    );

    let shutdown = CancellationToken::new();
    let state = ServerState::new(
        config.id.clone(),
        config.content_dir.clone(),
        config.idle_timeout,
        shutdown.clone(),
    );

    let _watcher = watch::spawn(
        state.clone(),
        &[config.content_dir.as_path(), config.runtime_dir.as_path()],
    )?;

    let app = routes::router(state);
    let server = axum::serve(listener, app).into_future();

    let result = tokio::select! {
        res = server => res.map_err(|e| ArtifactError::ServerFailed {
            message: format!("Server error: {e}"),
        }),
        () = shutdown.cancelled() => Ok(()),
        () = shutdown_signal() => Ok(()),
    };

    remove_pid_file(&pid_file);
    tracing::info!(target: TRACING_TARGET_SHUTDOWN, id = %config.id, "preview server stopped");
    result
}

/// Atomically publish our pid; the supervisor never sees a partially written file
fn write_pid_file(path: &Path, pid: u32) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| file_write_failed(path, e))?;
    tmp.write_all(pid.to_string().as_bytes())
        .map_err(|e| file_write_failed(path, e))?;
    tmp.persist(path)
        .map_err(|e| file_write_failed(path, e.error))?;
    Ok(())
}

fn remove_pid_file(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %err,
            "pid file already gone"
        );
    }
}

/// Waits for SIGTERM or Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %e,
                "Failed to install Ctrl+C handler"
            );
            std::future::pending::<()>().await;
        } else {
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Received Ctrl+C signal");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;

        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Received SIGTERM signal");
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
