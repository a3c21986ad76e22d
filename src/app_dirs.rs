//! Centralized filesystem paths for midwatch.
//!
//! Everything lives in one home directory so that a scheduled task launched
//! from an arbitrary working directory still finds its config, state files,
//! and scheduler scripts. By default the home directory is the directory
//! containing the executable.
//!
//! # Environment Overrides
//!
//! - `MIDWATCH_DIR` — overrides [`home_dir`] (used by tests and custom
//!   deployments).

use std::path::{Path, PathBuf};

/// Application home directory.
///
/// Resolves to the executable's parent directory by default. Override with
/// the `MIDWATCH_DIR` environment variable. Falls back to the platform data
/// directory when the executable path cannot be resolved.
#[must_use]
pub fn home_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MIDWATCH_DIR") {
        return PathBuf::from(override_dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("midwatch"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
}

/// Main config file path (`home_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    home_dir().join("config.toml")
}

/// Install-schedule script path (`home_dir()/create_task.bat`).
#[must_use]
pub fn create_script() -> PathBuf {
    home_dir().join(crate::schedule::CREATE_SCRIPT_NAME)
}

/// Uninstall-schedule script path (`home_dir()/delete_task.bat`).
#[must_use]
pub fn delete_script() -> PathBuf {
    home_dir().join(crate::schedule::DELETE_SCRIPT_NAME)
}
