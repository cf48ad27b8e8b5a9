//! Default location of the artifact home

use std::env;
use std::path::PathBuf;

/// Directory name of the artifact home under the temp base
pub const HOME_DIR_NAME: &str = "artifact-cli";

/// Absolute base for ephemeral artifact data. A relative `TMPDIR` is ignored so runtime state
/// never lands in a project checkout.
pub fn temp_dir_base() -> PathBuf {
    Some(env::temp_dir())
        .filter(|dir| dir.is_absolute())
        .unwrap_or_else(platform_temp)
}

#[cfg(windows)]
fn platform_temp() -> PathBuf {
    ["TEMP", "TMP"]
        .into_iter()
        .filter_map(|key| env::var_os(key).map(PathBuf::from))
        .find(|dir| dir.is_absolute())
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows\Temp"))
}

#[cfg(not(windows))]
fn platform_temp() -> PathBuf {
    PathBuf::from("/tmp")
}

/// Default artifact home: `<temp base>/artifact-cli`
pub fn default_home() -> PathBuf {
    temp_dir_base().join(HOME_DIR_NAME)
}
