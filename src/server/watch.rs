//! Filesystem change propagation
//!
//! Watches the content directory (user edits to `component.tsx`) and the runtime directory
//! (the `.reload` signal file written by `artifact update`) and turns relevant events into
//! `reload` broadcasts. notify delivers events on its own thread; they are bridged onto the
//! server's event loop through an unbounded channel.

use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::state::ServerState;
use crate::error::{ArtifactError, Result};
use crate::paths::{COMPONENT_FILE, RELOAD_FILE};

const TRACING_TARGET: &str = "artifact::server::watch";

/// Events arriving within this window after the first relevant one become a single broadcast
pub const DEBOUNCE: Duration = Duration::from_millis(50);

/// Start watching `dirs` and broadcasting reloads through `state`.
///
/// Dropping the returned watcher ends the watch.
pub fn spawn(state: ServerState, dirs: &[&Path]) -> Result<RecommendedWatcher> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })
    .map_err(watch_failed)?;

    for dir in dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| watch_failed(format!("{}: {e}", dir.display())))?;
        tracing::debug!(target: TRACING_TARGET, dir = %dir.display(), "watching");
    }

    tokio::spawn(forward(rx, state));
    Ok(watcher)
}

fn watch_failed(reason: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::ServerFailed {
        message: format!("Failed to watch for changes: {reason}"),
    }
}

async fn forward(mut rx: mpsc::UnboundedReceiver<notify::Result<Event>>, state: ServerState) {
    while let Some(res) = rx.recv().await {
        if !is_relevant(&res) {
            continue;
        }

        let window = tokio::time::sleep(DEBOUNCE);
        tokio::pin!(window);
        loop {
            tokio::select! {
                () = &mut window => break,
                more = rx.recv() => {
                    if more.is_none() {
                        break;
                    }
                }
            }
        }

        state.broadcast_reload();
    }
}

/// Create, modify or remove of the component file or the reload signal file
pub fn is_relevant(res: &notify::Result<Event>) -> bool {
    let event = match res {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(target: TRACING_TARGET, error = %err, "watch error");
            return false;
        }
    };

    let kind_matches = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );

    kind_matches
        && event.paths.iter().any(|path| {
            path.file_name().is_some_and(|name| {
                name == OsStr::new(COMPONENT_FILE) || name == OsStr::new(RELOAD_FILE)
            })
        })
}
