use thiserror::Error;

/// Top-level error type for Mynah.
#[derive(Debug, Error)]
pub enum MynahError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Telegram transport or API error.
    #[error("telegram error: {0}")]
    Telegram(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
