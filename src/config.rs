//! Configuration for the status watcher.

use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};

/// Default base URL of the MID application status endpoint.
///
/// The tracked identifier is appended verbatim.
pub const DEFAULT_ENDPOINT: &str = "https://info.midpass.ru/api/request/";

/// Watcher configuration, loaded once at startup and passed by reference to
/// every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Telegram bot token.
    pub bot_token: String,
    /// Telegram chat id notifications are sent to.
    pub chat_id: i64,
    /// Base status endpoint URL (identifier appended verbatim).
    pub endpoint: String,
    /// Tracked application identifiers.
    pub request_ids: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: 0,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            request_ids: Vec::new(),
        }
    }
}

impl WatchConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WatchError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| WatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be
    /// serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WatchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(WatchError::Config("bot_token is empty".to_owned()));
        }
        if self.chat_id == 0 {
            return Err(WatchError::Config("chat_id is not set".to_owned()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(WatchError::Config("endpoint is empty".to_owned()));
        }
        if self.request_ids.is_empty() {
            return Err(WatchError::Config(
                "request_ids is empty: nothing to track".to_owned(),
            ));
        }
        for id in &self.request_ids {
            validate_request_id(id)?;
        }
        Ok(())
    }
}

/// Identifiers become state-file names, so restrict them to a safe charset.
fn validate_request_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(WatchError::Config("request id is empty".to_owned()));
    }
    let valid = id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return Err(WatchError::Config(format!(
            "request id '{id}' contains invalid characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn valid_config() -> WatchConfig {
        WatchConfig {
            bot_token: "123456:ABC-token".to_owned(),
            chat_id: 987_654_321,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            request_ids: vec!["2000123456".to_owned()],
        }
    }

    #[test]
    fn default_endpoint_is_set() {
        let config = WatchConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.request_ids.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = valid_config();
        config.request_ids = vec!["12345".to_owned(), "67890".to_owned()];

        config.save_to_file(&path).unwrap();
        let loaded = WatchConfig::from_file(&path).unwrap();

        assert_eq!(loaded.bot_token, config.bot_token);
        assert_eq!(loaded.chat_id, config.chat_id);
        assert_eq!(loaded.request_ids, config.request_ids);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = WatchConfig::from_file(std::path::Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(WatchError::Config(_))));
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(WatchConfig::from_file(&path).is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_then_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "bot_token = \"t\"\nchat_id = 1").unwrap();

        // endpoint defaults, but request_ids is empty -> validation error
        let result = WatchConfig::from_file(&path);
        assert!(matches!(result, Err(WatchError::Config(msg)) if msg.contains("request_ids")));
    }

    #[test]
    fn empty_bot_token_rejected() {
        let mut config = valid_config();
        config.bot_token = "  ".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn request_id_charset_enforced() {
        assert!(validate_request_id("2000123456").is_ok());
        assert!(validate_request_id("abc_DEF-123").is_ok());
        assert!(validate_request_id("../../etc/passwd").is_err());
        assert!(validate_request_id("id with spaces").is_err());
        assert!(validate_request_id("").is_err());
    }
}
