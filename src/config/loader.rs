//! Configuration loader for dingtalk-bot
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from an optional TOML file and `DINGTALK_*` environment
//! variables, with environment variables taking precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration file
const CONFIG_FILE_ENV: &str = "DINGTALK_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "DINGTALK";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. Built-in defaults
/// 2. The TOML file given by `--config` or `DINGTALK_CONFIG_FILE` (optional)
/// 3. `DINGTALK_*` environment variables
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path, if any
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads `DINGTALK_CONFIG_FILE` when set
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV)
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Create a loader for an explicit configuration file
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_file: Some(path.into()),
        }
    }

    /// Get the configuration file path
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configured file does not exist
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref path) => Self::add_file_source(builder, path)?,
            None => builder,
        };

        // DINGTALK_BOT__WEBHOOK -> bot.webhook
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Add a required TOML file source
    fn add_file_source(builder: Builder, path: &Path) -> Result<Builder, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let file = File::from(path).format(FileFormat::Toml).required(true);
        Ok(builder.add_source(file))
    }

    /// Add environment variable source to the config builder
    ///
    /// Double underscores (`__`) separate nested keys:
    /// - `DINGTALK_BOT__SECRET` -> `bot.secret`
    /// - `DINGTALK_HTTP__TIMEOUT_SECONDS` -> `http.timeout_seconds`
    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Global mutex to ensure tests run sequentially to avoid env var conflicts
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BOT_VARS: &[&str] = &[
        "DINGTALK_CONFIG_FILE",
        "DINGTALK_BOT__WEBHOOK",
        "DINGTALK_BOT__BASE_URL",
        "DINGTALK_BOT__ACCESS_TOKEN",
        "DINGTALK_BOT__SECRET",
        "DINGTALK_HTTP__TIMEOUT_SECONDS",
        "DINGTALK_LOGGER__LEVEL",
    ];

    /// Helper to create a temporary config file
    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("dingtalk.toml");
        fs::write(&path, content).expect("Failed to write config file");
        (temp_dir, path)
    }

    /// Helper to safely set environment variables for a test
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate for every variable the loader reads
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in BOT_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // Restore in reverse so the first recorded original wins
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_new_without_env() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new();
        assert!(loader.config_file().is_none());
    }

    #[test]
    fn test_new_reads_config_file_env() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("DINGTALK_CONFIG_FILE", "/etc/dingtalk.toml");

        let loader = ConfigLoader::new();
        assert_eq!(loader.config_file(), Some(Path::new("/etc/dingtalk.toml")));
    }

    #[test]
    fn test_load_defaults_without_sources() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let settings = ConfigLoader::default().load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let (_dir, path) = write_config(
            r#"
            [bot]
            base_url = "https://oapi.dingtalk.com/robot/send"
            access_token = "abc123"
            secret = "SECxyz"

            [logger]
            level = "debug"
            format = "json"
            "#,
        );

        let settings = ConfigLoader::with_file(&path).load().unwrap();
        assert_eq!(
            settings.bot.base_url.as_deref(),
            Some("https://oapi.dingtalk.com/robot/send")
        );
        assert_eq!(settings.bot.access_token.as_deref(), Some("abc123"));
        assert_eq!(settings.bot.secret.as_deref(), Some("SECxyz"));
        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.logger.format, "json");
    }

    #[test]
    fn test_env_overrides_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let toml = "[bot]\nwebhook = \"https://file/hook\"\nsecret = \"from-file\"\n";
        let (_dir, path) = write_config(toml);
        env.set("DINGTALK_BOT__SECRET", "from-env");
        env.set("DINGTALK_HTTP__TIMEOUT_SECONDS", "7");

        let settings = ConfigLoader::with_file(&path).load().unwrap();
        assert_eq!(settings.bot.webhook.as_deref(), Some("https://file/hook"));
        assert_eq!(settings.bot.secret.as_deref(), Some("from-env"));
        assert_eq!(settings.http.timeout_seconds, 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_load_file_with_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"dingtalk-\xff.toml"));
        fs::write(&path, "[bot]\nwebhook = \"https://file/hook\"\n").unwrap();

        let settings = ConfigLoader::with_file(&path).load().unwrap();
        assert_eq!(settings.bot.webhook.as_deref(), Some("https://file/hook"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let result = ConfigLoader::with_file("/nonexistent/dingtalk.toml").load();
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let (_dir, path) = write_config("[http]\ntimeout_seconds = 0\n");
        let result = ConfigLoader::with_file(&path).load();
        let err = result.unwrap_err();
        assert_eq!(err.field(), Some("http.timeout_seconds"));
    }
}
