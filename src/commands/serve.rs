//! Preview server entry point

use std::time::Duration;

use crate::cli::ServeArgs;
use crate::error::Result;
use crate::server::{self, ServerConfig};

/// Run the preview server in this process until it shuts down
pub fn run(args: ServeArgs) -> Result<()> {
    server::run(ServerConfig {
        id: args.id,
        port: args.port,
        content_dir: args.content_dir,
        runtime_dir: args.runtime_dir,
        idle_timeout: Duration::from_secs(args.idle_timeout_secs),
    })
}
