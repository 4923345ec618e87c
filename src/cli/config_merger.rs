//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use std::path::PathBuf;

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments override configuration file and environment values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading configuration from the specified path or default loader
    ///
    /// # Arguments
    /// * `config_path` - Optional path to configuration file. If None, `DINGTALK_CONFIG_FILE` is consulted
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::with_file(path),
            None => ConfigLoader::new(),
        };

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Arguments
    /// * `cli` - Parsed CLI arguments
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_destination_overrides(&mut config, cli);

        if let Some(timeout) = cli.timeout {
            config.http.timeout_seconds = timeout;
        }

        // Apply logging level overrides from global flags
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply destination and secret overrides
    ///
    /// A destination given on the command line replaces the configured one as
    /// a whole, so `--base-url`/`--access-token` are not shadowed by a
    /// `webhook` from the file.
    fn apply_destination_overrides(&self, config: &mut Settings, cli: &Cli) {
        if let Some(ref webhook) = cli.webhook {
            config.bot.webhook = Some(webhook.clone());
        } else if cli.base_url.is_some() || cli.access_token.is_some() {
            config.bot.webhook = None;
            if let Some(ref base_url) = cli.base_url {
                config.bot.base_url = Some(base_url.clone());
            }
            if let Some(ref access_token) = cli.access_token {
                config.bot.access_token = Some(access_token.clone());
            }
        }

        if let Some(ref secret) = cli.secret {
            config.bot.secret = Some(secret.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotSettings;
    use clap::Parser;

    fn base_config() -> Settings {
        Settings {
            bot: BotSettings {
                webhook: Some("https://file/hook?access_token=file".to_string()),
                base_url: None,
                access_token: None,
                secret: Some("file-secret".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_without_overrides_keeps_base() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["dingtalk-bot", "check"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap(), base_config());
    }

    #[test]
    fn test_merge_verbose_flag() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["dingtalk-bot", "--verbose", "check"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["dingtalk-bot", "--quiet", "check"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_webhook_and_secret() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from([
            "dingtalk-bot",
            "--webhook",
            "https://cli/hook",
            "--secret",
            "cli-secret",
            "check",
        ])
        .unwrap();

        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.bot.webhook.as_deref(), Some("https://cli/hook"));
        assert_eq!(merged.bot.secret.as_deref(), Some("cli-secret"));
    }

    #[test]
    fn test_merge_token_replaces_file_webhook() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from([
            "dingtalk-bot",
            "--base-url",
            "https://oapi.dingtalk.com/robot/send",
            "--access-token",
            "cli-token",
            "check",
        ])
        .unwrap();

        let merged = merger.merge_cli_args(&cli).unwrap();
        assert!(merged.bot.webhook.is_none());
        assert_eq!(merged.bot.access_token.as_deref(), Some("cli-token"));
        assert_eq!(merged.bot.secret.as_deref(), Some("file-secret"));
    }

    #[test]
    fn test_merge_timeout() {
        let merger = ConfigurationMerger::new(Settings::default());
        let cli = Cli::try_parse_from(["dingtalk-bot", "--timeout", "5", "check"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap().http.timeout_seconds, 5);
    }
}
