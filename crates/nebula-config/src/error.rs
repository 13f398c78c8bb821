//! Configuration error types.

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write a config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// Failed to parse or serialize plugin settings JSON.
    #[error("invalid plugin settings JSON: {0}")]
    JsonError(#[source] serde_json::Error),

    /// A setting parsed but violates a constraint.
    #[error("invalid setting {field} in {item}: {reason}")]
    InvalidSetting {
        item: String,
        field: &'static str,
        reason: String,
    },
}
