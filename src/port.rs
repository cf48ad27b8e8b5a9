//! Local TCP port allocation
//!
//! Ports are reserved optimistically: the probe listener is dropped before the port is handed
//! back, so another process could grab it before the preview server rebinds. No retry loop.

use std::net::{Ipv4Addr, TcpListener};

use crate::error::Result;

const TRACING_TARGET: &str = "artifact::port";

/// Return an available loopback port, favouring `preferred` when it can be bound right now
pub fn allocate(preferred: Option<u16>) -> Result<u16> {
    if let Some(port) = preferred.filter(|p| *p != 0) {
        match TcpListener::bind((Ipv4Addr::LOCALHOST, port)) {
            Ok(listener) => {
                drop(listener);
                tracing::debug!(target: TRACING_TARGET, port, "preferred port available");
                return Ok(port);
            }
            Err(err) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    port,
                    error = %err,
                    "preferred port unavailable, asking the OS"
                );
            }
        }
    }

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
    let port = listener.local_addr()?.port();
    drop(listener);

    tracing::debug!(target: TRACING_TARGET, port, "allocated ephemeral port");
    Ok(port)
}
