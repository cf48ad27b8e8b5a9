//! Runtime settings resolved from the environment
//!
//! No variable is required. Every override falls back to its default when absent or invalid.

use std::path::PathBuf;
use std::time::Duration;

use crate::temp;

const TRACING_TARGET: &str = "artifact::config";

/// Overrides the artifact home (store document and ephemeral directories)
pub const HOME_ENV: &str = "ARTIFACT_HOME";

/// Idle duration, in seconds, handed to newly started preview servers
pub const IDLE_TIMEOUT_ENV: &str = "ARTIFACT_IDLE_TIMEOUT_SECS";

/// Upper bound, in milliseconds, of the supervisor start handshake
pub const START_TIMEOUT_ENV: &str = "ARTIFACT_START_TIMEOUT_MS";

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_millis(5000);

/// Settings for one CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home: PathBuf,
    pub idle_timeout: Duration,
    pub start_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home: temp::default_home(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            start_timeout: DEFAULT_START_TIMEOUT,
        }
    }
}

impl Settings {
    /// Resolve settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Anchored to the invocation's cwd: servers run with the content dir as their cwd
        let home = lookup(HOME_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .map_or(defaults.home, |home| std::path::absolute(&home).unwrap_or(home));

        let idle_timeout = parse_number(&lookup, IDLE_TIMEOUT_ENV)
            .map_or(defaults.idle_timeout, Duration::from_secs);

        let start_timeout = parse_number(&lookup, START_TIMEOUT_ENV)
            .filter(|ms| *ms > 0)
            .map_or(defaults.start_timeout, Duration::from_millis);

        Self {
            home,
            idle_timeout,
            start_timeout,
        }
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                variable = key,
                value = %raw,
                error = %err,
                "ignoring invalid numeric override"
            );
            None
        }
    }
}
