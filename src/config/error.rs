//! Errors raised while loading settings

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` or `DINGTALK_CONFIG_FILE` points at a missing file
    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Sources merged but did not fit the `Settings` shape
    #[error("failed to deserialize settings: {0}")]
    ParseError(String),

    #[error("invalid setting `{field}`: {message}")]
    ValidationError { field: String, message: String },

    /// Reading or merging a source failed
    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }

    /// Dotted key of the offending setting, if the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}
