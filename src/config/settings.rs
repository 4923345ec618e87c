//! Configuration settings structures for dingtalk-bot
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;
use crate::services::NotifierConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Bot
// ============================================================================

/// Robot destination and signing secret
///
/// Mirrors [`NotifierConfig`]; whether a usable destination is present is
/// checked when the notifier is built, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Full webhook URL
    #[serde(default)]
    pub webhook: Option<String>,

    /// Robot send endpoint, combined with `access_token`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    /// Signing secret
    #[serde(default)]
    pub secret: Option<String>,
}

impl BotSettings {
    pub fn into_notifier_config(self) -> NotifierConfig {
        NotifierConfig {
            webhook: self.webhook,
            base_url: self.base_url,
            access_token: self.access_token,
            secret: self.secret,
        }
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP client timeouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

// ============================================================================
// Logger
// ============================================================================

/// Logger configuration as it appears in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "full", "compact", "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Use ANSI colors when writing to a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: true,
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        LoggerConfig::parse(&self.level, &self.format, self.colored)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Robot destination
    #[serde(default)]
    pub bot: BotSettings,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpSettings,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}
