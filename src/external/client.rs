use std::sync::LazyLock;
use std::time::Duration;

use crate::config::HttpSettings;

/// Global HTTP client instance shared by every notifier built with defaults
///
/// This client is initialized lazily on first access and reused across the process.
///
/// # Features
/// - **Connection pooling**: Reuses TCP connections when several messages are sent
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use dingtalk_bot::external::client::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://oapi.dingtalk.com/robot/send?access_token=...")
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    build_http_client(&HttpSettings::default()).expect("Failed to build HTTP client")
});

/// Builds a client with the given timeouts
///
/// Used by the CLI when `[http]` settings differ from the defaults.
pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_seconds))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // Enable compression
        .gzip(true)
        .user_agent(user_agent())
        .build()
}

fn user_agent() -> String {
    format!("dingtalk-bot/{}", crate::pkg_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        // Access the client to ensure it initializes without panicking
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_build_with_custom_timeouts() {
        let settings = HttpSettings {
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        };
        assert!(build_http_client(&settings).is_ok());
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(user_agent().starts_with("dingtalk-bot/"));
    }
}
