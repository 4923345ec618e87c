//! HTTP transport capability for the notifier.
//!
//! The notifier never talks to `reqwest` directly; it goes through
//! [`HttpTransport`] so tests can swap in a recording transport.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::client::HTTP_CLIENT;
use crate::error::TransportError;

/// Response returned by the webhook, surfaced to the caller as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Parses the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Parses the body as the robot API's `{errcode, errmsg}` envelope
    pub fn reply(&self) -> Result<DingtalkReply, serde_json::Error> {
        self.json()
    }
}

/// Envelope the robot API returns in every 200 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingtalkReply {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl DingtalkReply {
    pub fn is_ok(&self) -> bool {
        self.errcode == 0
    }
}

/// Issues a single JSON POST.
///
/// Implementations must be `Send + Sync`; the notifier shares one transport
/// across concurrent sends.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Posts `body` (already JSON-encoded) to `url` with `Content-Type: application/json`
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(HTTP_CLIENT.clone())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Webhook request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
