//! DingTalk robot webhook notifier.
//!
//! Resolves the destination once at construction, then each call signs (when
//! a secret is configured), serializes and posts exactly one request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::signer::{Clock, SignedQuery, SystemClock};
use crate::error::{NotifierError, NotifierResult, TransportError};
use crate::external::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::models::{At, CardOptions, Message};

// ============================================================================
// Configuration
// ============================================================================

/// Destination and signing settings for a [`Notifier`]
///
/// Either `webhook` or both `base_url` and `access_token` must be set.
/// `webhook` wins when both shapes are present. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierConfig {
    /// Full webhook URL, including `access_token`
    #[serde(default)]
    pub webhook: Option<String>,
    /// Robot send endpoint, e.g. `https://oapi.dingtalk.com/robot/send`
    #[serde(default, alias = "base_url")]
    pub base_url: Option<String>,
    #[serde(default, alias = "access_token")]
    pub access_token: Option<String>,
    /// Signing secret (`SEC...`) for robots with the "sign" security setting
    #[serde(default)]
    pub secret: Option<String>,
}

impl NotifierConfig {
    pub fn webhook(url: impl Into<String>) -> Self {
        Self {
            webhook: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            access_token: Some(access_token.into()),
            ..Default::default()
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// The two accepted destination shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Webhook(String),
    Token {
        base_url: String,
        access_token: String,
    },
}

impl Destination {
    pub fn from_config(config: &NotifierConfig) -> NotifierResult<Self> {
        if let Some(webhook) = non_empty(&config.webhook) {
            return Ok(Destination::Webhook(webhook.to_string()));
        }

        match (non_empty(&config.base_url), non_empty(&config.access_token)) {
            (Some(base_url), Some(access_token)) => Ok(Destination::Token {
                base_url: base_url.to_string(),
                access_token: access_token.to_string(),
            }),
            _ => Err(NotifierError::configuration(
                "either `webhook` or both `base_url` and `access_token` must be set",
            )),
        }
    }

    /// Canonical URL the notifier posts to
    pub fn url(&self) -> String {
        match self {
            Destination::Webhook(url) => url.clone(),
            Destination::Token {
                base_url,
                access_token,
            } => format!("{}?access_token={}", base_url, access_token),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ============================================================================
// Notifier
// ============================================================================

/// Sends messages to one DingTalk robot.
///
/// Immutable after construction and cheap to clone; concurrent sends share
/// nothing mutable.
///
/// # Example
/// ```ignore
/// let notifier = Notifier::new(
///     NotifierConfig::webhook("https://oapi.dingtalk.com/robot/send?access_token=xxx")
///         .with_secret("SECxxx"),
/// )?;
/// notifier.text("Pipeline #42 passed", None).await?;
/// ```
#[derive(Clone)]
pub struct Notifier {
    url: String,
    secret: Option<String>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl Notifier {
    /// Creates a notifier using the shared HTTP client and the system clock
    pub fn new(config: NotifierConfig) -> NotifierResult<Self> {
        Self::with_capabilities(
            config,
            Arc::new(ReqwestTransport::default()),
            Arc::new(SystemClock),
        )
    }

    /// Creates a notifier with an explicit transport and clock
    pub fn with_capabilities(
        config: NotifierConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> NotifierResult<Self> {
        let destination = Destination::from_config(&config)?;

        Ok(Self {
            url: destination.url(),
            secret: config.secret.filter(|s| !s.is_empty()),
            transport,
            clock,
        })
    }

    /// Resolved destination URL, without signature parameters
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolved destination URL with the access token masked, for display
    pub fn masked_url(&self) -> String {
        mask_access_token(&self.url)
    }

    pub fn is_signed(&self) -> bool {
        self.secret.is_some()
    }

    /// Posts an arbitrary JSON payload
    ///
    /// The provider's response is returned untouched; an `errcode` in a 200
    /// body is not treated as a failure.
    pub async fn send<T>(&self, payload: &T) -> NotifierResult<HttpResponse>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(TransportError::from)?;
        let url = self.request_url();

        tracing::debug!(
            url = %self.masked_url(),
            signed = self.is_signed(),
            bytes = body.len(),
            "Posting DingTalk webhook"
        );

        let response = self.transport.post_json(&url, body).await?;

        tracing::debug!(status = response.status, "DingTalk webhook responded");
        Ok(response)
    }

    /// Sends a text message, optionally mentioning group members
    pub async fn text(
        &self,
        content: impl Into<String>,
        at: Option<At>,
    ) -> NotifierResult<HttpResponse> {
        self.send_message(Message::text(content, at)).await
    }

    /// Sends an action card
    pub async fn action_card(&self, card: CardOptions) -> NotifierResult<HttpResponse> {
        self.send_message(Message::action_card(card)).await
    }

    async fn send_message(&self, message: Message) -> NotifierResult<HttpResponse> {
        tracing::debug!(msgtype = message.msgtype(), "Sending DingTalk message");
        self.send(&message).await
    }

    fn request_url(&self) -> String {
        match &self.secret {
            Some(secret) => {
                let query = SignedQuery::new(secret, self.clock.as_ref());
                format!("{}{}", self.url, query)
            }
            None => self.url.clone(),
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("url", &self.masked_url())
            .field("signed", &self.is_signed())
            .finish_non_exhaustive()
    }
}

/// Replaces the `access_token` query value with `***`
pub fn mask_access_token(url: &str) -> String {
    const KEY: &str = "access_token=";

    match url.find(KEY) {
        Some(start) => {
            let value_start = start + KEY.len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
