//! Tavus HTTP client - reqwest implementation of the `UpstreamClient` port.
//!
//! # Configuration
//!
//! ```ignore
//! let client = TavusHttpClient::new(
//!     TavusClientConfig::new("https://tavusapi.com").with_timeout(Duration::from_secs(30)),
//! )?;
//! ```
//!
//! Authentication uses the provider's `x-api-key` header. JSON bodies are
//! sent with a JSON content type. Path segments are percent-encoded one by
//! one so a resource id can never escape its segment.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::ports::{TransportError, UpstreamClient, UpstreamMethod, UpstreamRequest, UpstreamResponse};

/// Header carrying the provider secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the Tavus HTTP client.
#[derive(Debug, Clone)]
pub struct TavusClientConfig {
    /// Base URL for the API (default: https://tavusapi.com).
    pub base_url: String,
    /// Request timeout; an unresponsive upstream becomes a transport failure.
    pub timeout: Duration,
}

impl TavusClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(20),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&UpstreamConfig> for TavusClientConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(config.timeout())
    }
}

/// reqwest-backed upstream client.
pub struct TavusHttpClient {
    config: TavusClientConfig,
    base_url: Url,
    client: Client,
}

impl TavusHttpClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: TavusClientConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds the absolute URL for a request's path segments.
    ///
    /// Dot segments are refused: the url crate would drop them and address
    /// the parent path instead.
    fn endpoint_url(&self, segments: &[String]) -> Result<Url, TransportError> {
        if let Some(segment) = segments.iter().find(|s| matches!(s.as_str(), "." | "..")) {
            return Err(TransportError::InvalidUrl(format!(
                "dot segment {:?} in request path",
                segment
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments.iter().map(String::as_str));
        Ok(url)
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl UpstreamClient for TavusHttpClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let url = self.endpoint_url(&request.segments)?;

        let builder = match request.method {
            UpstreamMethod::Get => self.client.get(url),
            UpstreamMethod::Post => self.client.post(url),
        }
        .header(API_KEY_HEADER, request.api_key());

        // `json` sets the JSON content type.
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
