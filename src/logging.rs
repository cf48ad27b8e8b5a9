//! Tracing subscriber setup
//!
//! Logs always go to stderr. For a preview server stderr is its `server.log`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "ARTIFACT_LOG";

/// Which process is logging; decides the default level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Cli { verbose: bool },
    Server,
}

impl LogMode {
    pub fn default_directive(self) -> &'static str {
        match self {
            LogMode::Cli { verbose: false } => "warn",
            LogMode::Cli { verbose: true } => "debug",
            LogMode::Server => "info",
        }
    }
}

pub fn init(mode: LogMode) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(mode.default_directive()));

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(matches!(mode, LogMode::Cli { .. }));

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(LogMode::Cli { verbose: false }.default_directive(), "warn");
        assert_eq!(LogMode::Cli { verbose: true }.default_directive(), "debug");
        assert_eq!(LogMode::Server.default_directive(), "info");
    }
}
