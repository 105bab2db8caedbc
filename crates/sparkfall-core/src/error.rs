//! Error types for sparkfall

use thiserror::Error;

/// The main error type for sparkfall operations
#[derive(Debug, Error)]
pub enum SparkfallError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Config serialization error: {0}")]
    ConfigSerialize(String),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Image error: {0}")]
    Image(String),
}

/// Result type alias for sparkfall operations
pub type Result<T> = std::result::Result<T, SparkfallError>;

impl From<toml::de::Error> for SparkfallError {
    fn from(err: toml::de::Error) -> Self {
        SparkfallError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for SparkfallError {
    fn from(err: toml::ser::Error) -> Self {
        SparkfallError::ConfigSerialize(err.to_string())
    }
}

impl SparkfallError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SparkfallError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
