//! Error types for the status watcher.

/// Top-level error type for midwatch.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Configuration file missing, unreadable, or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Transport-level failure reaching the status service.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP response from the status service.
    #[error("status service returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The service rejected the application identifier as not valid.
    #[error("application id '{0}' was rejected by the status service")]
    InvalidRequestId(String),

    /// Response body was not valid JSON or is missing expected fields.
    #[error("malformed status response: {0}")]
    Parse(String),

    /// Telegram delivery failure.
    #[error("notify error: {0}")]
    Notify(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WatchError>;
