//! Configuration validation logic
//!
//! Range and format checks for loaded settings. Destination completeness is
//! left to `Notifier::new`, which owns that rule.

use crate::config::error::ConfigError;
use crate::config::settings::{BotSettings, HttpSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl BotSettings {
    /// Validate bot configuration
    ///
    /// # Validation Rules
    /// - `webhook` and `base_url`, when set, must be http(s) URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("bot.webhook", &self.webhook),
            ("bot.base_url", &self.base_url),
        ] {
            if let Some(url) = value.as_deref().filter(|s| !s.is_empty())
                && !(url.starts_with("https://") || url.starts_with("http://"))
            {
                return Err(ConfigError::validation(
                    field.to_string(),
                    format!("'{}' must start with http:// or https://", url),
                ));
            }
        }

        Ok(())
    }
}

impl HttpSettings {
    /// Validate HTTP configuration
    ///
    /// # Validation Rules
    /// - Both timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "logger.level".to_string(),
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        let format = self.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::validation(
                "logger.format".to_string(),
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bot.validate()?;
        self.http.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
