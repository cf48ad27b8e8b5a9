//! Error types and handling for Artifact
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Sub-modules hold convenience constructors by error domain:
//! - [`fs`]: File system errors

pub mod fs;

pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Artifact operations
#[derive(Error, Diagnostic, Debug)]
pub enum ArtifactError {
    // Record errors
    #[error("Artifact not found: {id}")]
    #[diagnostic(
        code(artifact::record::not_found),
        help("Run 'artifact list' to see known artifacts; it may have been cleaned up")
    )]
    NotFound { id: String },

    #[error("Artifact {id} is still running")]
    #[diagnostic(
        code(artifact::record::still_running),
        help("Stop it first with 'artifact stop <id>', or pass --force")
    )]
    StillRunning { id: String },

    // Analysis errors
    #[error("Failed to analyze component {path}: {reason}")]
    #[diagnostic(
        code(artifact::analysis::failed),
        help("Check that the source file still exists and is a readable component")
    )]
    AnalysisFailed { path: String, reason: String },

    // Supervisor errors
    #[error("Preview server for {id} did not report a pid within {waited_ms}ms")]
    #[diagnostic(
        code(artifact::supervisor::spawn_timeout),
        help("Inspect the server log in the artifact's .runtime directory")
    )]
    SpawnTimeout { id: String, waited_ms: u128 },

    #[error("Preview server failed: {message}")]
    #[diagnostic(code(artifact::server::failed))]
    ServerFailed { message: String },

    // Store errors
    #[error("Failed to write artifact store {path}: {reason}")]
    #[diagnostic(code(artifact::store::write_failed))]
    StoreFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(artifact::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(artifact::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(artifact::fs::io_error))]
    IoError { message: String },

    // Argument errors
    #[error("{message}")]
    #[diagnostic(code(artifact::cli::invalid_arguments))]
    InvalidArguments { message: String },
}

impl From<std::io::Error> for ArtifactError {
    fn from(err: std::io::Error) -> Self {
        ArtifactError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(err: serde_json::Error) -> Self {
        ArtifactError::IoError {
            message: format!("JSON error: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ArtifactError>;
