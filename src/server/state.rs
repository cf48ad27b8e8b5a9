//! Watcher registry and idle shutdown timer
//!
//! Every open `/__reload` stream is a watcher. When the last watcher goes away an idle timer is
//! armed; when it expires with the set still empty the server's shutdown token is cancelled.
//!
//! The timer is armed only on the nonempty to empty transition and disarmed only on a connect,
//! both under the same lock. Each arming gets a fresh generation number and an expiring timer
//! acts only if its generation is still the armed one, so a reconnect racing an expiring timer
//! always wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_util::sync::CancellationToken;

use crate::paths;

const TRACING_TARGET: &str = "artifact::server::state";

/// Pending notices per watcher before further ones are dropped. A watcher with a queued reload
/// loses nothing by missing another.
const WATCHER_BUFFER: usize = 8;

/// Message pushed to a watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Connected,
    Reload,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Notice::Connected => "connected",
            Notice::Reload => "reload",
        }
    }
}

#[derive(Debug, Default)]
struct Watchers {
    next_id: u64,
    senders: HashMap<u64, mpsc::Sender<Notice>>,
    generation: u64,
    armed: Option<u64>,
}

#[derive(Debug)]
struct Inner {
    id: String,
    content_dir: PathBuf,
    idle_timeout: Duration,
    shutdown: CancellationToken,
    watchers: Mutex<Watchers>,
}

/// Shared state of one preview server
#[derive(Debug, Clone)]
pub struct ServerState {
    inner: Arc<Inner>,
}

impl ServerState {
    pub fn new(
        id: impl Into<String>,
        content_dir: impl Into<PathBuf>,
        idle_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: id.into(),
                content_dir: content_dir.into(),
                idle_timeout,
                shutdown,
                watchers: Mutex::new(Watchers::default()),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn component_file(&self) -> PathBuf {
        paths::component_file(&self.inner.content_dir)
    }

    #[cfg(test)]
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    pub fn watcher_count(&self) -> usize {
        self.lock().senders.len()
    }

    /// Whether an idle timer is currently armed
    #[cfg(test)]
    pub fn idle_armed(&self) -> bool {
        self.lock().armed.is_some()
    }

    /// Register a watcher. The returned stream yields `Connected` first and unregisters the
    /// watcher when dropped.
    pub fn connect(&self) -> WatcherStream {
        let (tx, rx) = mpsc::channel(WATCHER_BUFFER);
        let _ = tx.try_send(Notice::Connected);

        let mut watchers = self.lock();
        let key = watchers.next_id;
        watchers.next_id += 1;
        watchers.senders.insert(key, tx);

        if watchers.armed.take().is_some() {
            tracing::info!(target: TRACING_TARGET, "client connected, cancelled idle shutdown");
        }
        tracing::info!(
            target: TRACING_TARGET,
            watchers = watchers.senders.len(),
            "client connected"
        );

        WatcherStream {
            rx,
            _guard: WatcherGuard {
                state: self.clone(),
                key,
            },
        }
    }

    /// Push `reload` to every watcher. A closed or saturated watcher is skipped.
    pub fn broadcast_reload(&self) -> usize {
        let watchers = self.lock();
        let mut delivered = 0;

        for (key, sender) in &watchers.senders {
            match sender.try_send(Notice::Reload) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::debug!(target: TRACING_TARGET, watcher = key, "reload already queued");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!(target: TRACING_TARGET, watcher = key, "watcher gone");
                }
            }
        }

        tracing::info!(
            target: TRACING_TARGET,
            delivered,
            watchers = watchers.senders.len(),
            "reload broadcast"
        );
        delivered
    }

    fn disconnect(&self, key: u64) {
        let mut watchers = self.lock();
        if watchers.senders.remove(&key).is_none() {
            return;
        }

        let remaining = watchers.senders.len();
        tracing::info!(
            target: TRACING_TARGET,
            watchers = remaining,
            "client disconnected"
        );
        if remaining > 0 {
            return;
        }

        watchers.generation += 1;
        let generation = watchers.generation;
        watchers.armed = Some(generation);
        drop(watchers);

        self.arm_idle_timer(generation);
    }

    fn arm_idle_timer(&self, generation: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(target: TRACING_TARGET, "no runtime, idle timer not armed");
            return;
        };

        tracing::info!(
            target: TRACING_TARGET,
            idle_secs = self.inner.idle_timeout.as_secs(),
            "no watchers, idle shutdown armed"
        );

        let state = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(state.inner.idle_timeout).await;
            state.expire(generation);
        });
    }

    fn expire(&self, generation: u64) {
        let mut watchers = self.lock();
        if watchers.armed != Some(generation) || !watchers.senders.is_empty() {
            return;
        }
        watchers.armed = None;
        drop(watchers);

        tracing::info!(target: TRACING_TARGET, "idle timeout reached, shutting down");
        self.inner.shutdown.cancel();
    }

    fn lock(&self) -> MutexGuard<'_, Watchers> {
        self.inner
            .watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Unregisters its watcher on drop
#[derive(Debug)]
struct WatcherGuard {
    state: ServerState,
    key: u64,
}

impl Drop for WatcherGuard {
    fn drop(&mut self) {
        self.state.disconnect(self.key);
    }
}

/// Notices for one watcher; dropping it is the disconnect
#[derive(Debug)]
pub struct WatcherStream {
    rx: mpsc::Receiver<Notice>,
    _guard: WatcherGuard,
}

impl Stream for WatcherStream {
    type Item = Notice;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Notice>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
