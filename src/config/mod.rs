//! Configuration management module for dingtalk-bot
//!
//! Used by the command-line binary only; the notifier itself takes a
//! [`NotifierConfig`](crate::services::NotifierConfig) and never reads files
//! or the environment.
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. TOML file from `--config` or `DINGTALK_CONFIG_FILE`
//! 3. `DINGTALK_*` environment variables
//! 4. Command-line flags (merged in `cli::config_merger`)

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{BotSettings, HttpSettings, LoggerSettings, Settings};
