//! Upstream Client Port - the gateway's single outbound seam.
//!
//! Every gateway operation maps to exactly one call through this trait. The
//! adapter performs no retries; a failed call is reported once and the
//! gateway collapses it to a generic failure.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use thiserror::Error;

/// Port for the conversational video provider's REST API.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Sends one request and returns the raw response, whatever its status.
    ///
    /// Only transport-level failures (connect, timeout, body read) are errors.
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
}

/// One outbound call: method, path segments, optional JSON body and the key.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: UpstreamMethod,
    /// Path segments relative to the base URL, unencoded.
    pub segments: Vec<String>,
    pub body: Option<Value>,
    api_key: Secret<String>,
}

impl UpstreamRequest {
    pub fn get<I, S>(segments: I, api_key: Secret<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: UpstreamMethod::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            api_key,
        }
    }

    pub fn post<I, S>(segments: I, body: Value, api_key: Secret<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: UpstreamMethod::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            body: Some(body),
            api_key,
        }
    }

    /// Slash-joined path, for logging and assertions.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Exposes the API key (for attaching the auth header).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Convenience constructor for a JSON response.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    /// Convenience constructor for a non-JSON response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.into().into_bytes(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON. The content type is not trusted either way.
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Transport-level failures of an outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),
}
