//! Common file system operations with unified error handling

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, file_read_failed, file_write_failed};

/// Create `dir` and its parents
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| file_write_failed(dir, e))
}

/// Copy one file, creating the destination directory. A missing source is a read failure.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(file_read_failed(src, "file does not exist"));
    }
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst).map_err(|e| file_write_failed(dst, e))?;
    Ok(())
}

/// Write `content` to `path`, creating the parent directory
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| file_write_failed(path, e))
}

/// Remove a file; returns whether it existed
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(file_write_failed(path, err)),
    }
}

/// Remove a directory tree; returns whether it existed
pub fn remove_dir_if_exists(dir: &Path) -> Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(file_write_failed(dir, err)),
    }
}
