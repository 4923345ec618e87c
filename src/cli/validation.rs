//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

use crate::models::ActionButton;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{path_str}': {e}")),
    }
}

/// Validate that a URL uses http or https
pub fn validate_url(url_str: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(url_str).map_err(|e| format!("Invalid URL '{url_str}': {e}"))?;

    match url.scheme() {
        "http" | "https" => Ok(url_str.to_string()),
        scheme => Err(format!(
            "URL must use http or https, got '{}' in '{}'",
            scheme, url_str
        )),
    }
}

/// Validate timeout is a positive number of seconds
pub fn validate_timeout(timeout_str: &str) -> Result<u64, String> {
    let timeout: u64 = timeout_str.parse().map_err(|_| {
        format!(
            "Timeout must be a positive number of seconds, got: '{}'",
            timeout_str
        )
    })?;

    if timeout == 0 {
        return Err("Timeout must be greater than 0".to_string());
    }

    Ok(timeout)
}

/// Parse a `TITLE=URL` button; the URL may itself contain `=`
pub fn parse_button(button_str: &str) -> Result<ActionButton, String> {
    let (title, url) = button_str
        .split_once('=')
        .ok_or_else(|| format!("Button must be TITLE=URL, got: '{button_str}'"))?;

    let title = title.trim();
    if title.is_empty() {
        return Err(format!("Button title cannot be empty: '{}'", button_str));
    }

    let url = validate_url(url.trim())?;
    Ok(ActionButton::new(title, url))
}
