//! File system errors

use std::path::Path;

use super::ArtifactError;

/// Creates a read failure for `path`
pub fn read_failed(path: &Path, reason: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a write failure for `path`
pub fn write_failed(path: &Path, reason: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> ArtifactError {
    ArtifactError::IoError {
        message: message.into(),
    }
}
