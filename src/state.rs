//! Per-identifier persisted percent store.
//!
//! One plain-text file per tracked identifier holding the last percent the
//! user was notified about. A missing, empty, or corrupt file reads as
//! [`UNKNOWN_PERCENT`], which forces a notification on the next check —
//! corruption is never an error here.

use crate::error::Result;
use std::path::PathBuf;

/// Sentinel for "no valid persisted percent".
pub const UNKNOWN_PERCENT: i32 = -1;

/// Filesystem store of last-seen completion percents.
#[derive(Debug, Clone)]
pub struct PercentStore {
    root: PathBuf,
}

impl PercentStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_for(&self, request_id: &str) -> PathBuf {
        self.root.join(format!("status_{request_id}.txt"))
    }

    /// Last recorded percent for the identifier, or [`UNKNOWN_PERCENT`] when
    /// no valid record exists.
    #[must_use]
    pub fn last_percent(&self, request_id: &str) -> i32 {
        let path = self.file_for(request_id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                tracing::info!(path = %path.display(), "no state file yet, treating percent as unknown");
                return UNKNOWN_PERCENT;
            }
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            tracing::info!(path = %path.display(), "state file is empty, treating percent as unknown");
            return UNKNOWN_PERCENT;
        }
        trimmed.parse().unwrap_or_else(|_| {
            tracing::warn!(path = %path.display(), content = %trimmed, "state file is corrupt, treating percent as unknown");
            UNKNOWN_PERCENT
        })
    }

    /// Persist the percent for the identifier, creating the root directory
    /// and the file as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn record(&self, request_id: &str, percent: i32) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.file_for(request_id);
        std::fs::write(&path, percent.to_string())?;
        tracing::info!(path = %path.display(), percent, "recorded percent");
        Ok(())
    }
}
