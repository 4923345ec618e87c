use thiserror::Error;

/// Errors surfaced by the DingTalk notifier.
///
/// Construction problems and delivery problems are kept apart so callers can
/// tell a configuration they must fix from a request that failed on the wire.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Required destination fields were missing at construction time
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The HTTP call failed (network, non-2xx status or payload serialization)
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl NotifierError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true when the error came from the HTTP layer rather than configuration
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Failures of the single outbound HTTP call.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status
    #[error("Webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload could not be encoded as JSON
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with NotifierError to simplify function signatures
pub type NotifierResult<T> = Result<T, NotifierError>;
