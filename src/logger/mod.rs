//! Logger Module
//!
//! Console logging on `tracing-subscriber` with:
//! - Level filtering through `EnvFilter` directives
//! - Full, compact or JSON formatting
//! - Color only when stderr is a terminal
//!
//! Output goes to stderr so stdout stays free for the webhook reply.

pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

// Re-export main types
pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger with the given configuration
///
/// Fails if a global subscriber has already been installed.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    let filter = build_filter(&config.directive())?;
    let use_ansi = config.colored && std::io::stderr().is_terminal();

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| LoggerError::init(e.to_string()))
}

/// Create the level filter; `RUST_LOG` takes precedence when set
fn build_filter(directive: &str) -> Result<EnvFilter, LoggerError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => EnvFilter::try_new(from_env),
        _ => EnvFilter::try_new(directive),
    };
    filter.map_err(|e| LoggerError::config(e.to_string()))
}
