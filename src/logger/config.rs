//! Logger configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use super::error::LoggerError;

/// Resolved logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: Level,
    pub format: LogFormat,
    /// ANSI colors; only applied when stderr is a terminal
    pub colored: bool,
}

impl LoggerConfig {
    /// Parse level and format names as they appear in settings files
    pub fn parse(level: &str, format: &str, colored: bool) -> Result<Self, LoggerError> {
        Ok(Self {
            level: parse_level(level)?,
            format: format.parse()?,
            colored,
        })
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter directive for `EnvFilter`
    ///
    /// HTTP internals stay at `info` or quieter so `debug` shows this crate's
    /// request logging without connection pool chatter.
    pub fn directive(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        if self.level > Level::INFO {
            format!("{level},hyper_util=info,hyper=info,h2=info,rustls=info")
        } else {
            level
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            colored: true,
        }
    }
}

/// Parse a level name, case-insensitively
pub fn parse_level(level: &str) -> Result<Level, LoggerError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(LoggerError::config(format!(
            "invalid log level '{level}', expected one of trace, debug, info, warn, error"
        ))),
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "invalid log format '{s}', expected one of full, compact, json"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
