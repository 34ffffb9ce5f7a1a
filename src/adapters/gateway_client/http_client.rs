//! reqwest implementation of the `GatewayApi` port.
//!
//! Talks to the gateway's own JSON surface, never to the provider. List
//! responses arrive already normalised to `{data: [...]}`; items that do not
//! decode into the typed snapshot are skipped.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::domain::conversation::{Conversation, StartedConversation};
use crate::domain::gateway::ResourceList;
use crate::domain::video::{VideoGenerationTicket, VideoJob};
use crate::ports::{ClientError, GatewayApi, GenerateVideoRequest};

/// Configuration for the gateway client.
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// Gateway root including the mount prefix, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the gateway surface.
pub struct HttpGatewayClient {
    base_url: Url,
    client: Client,
}

impl HttpGatewayClient {
    pub fn new(config: GatewayClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Transport(format!("Invalid gateway URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "Invalid gateway URL {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
            return Err(ClientError::Validation("Invalid resource id".to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport(format!("Invalid gateway URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Gateway {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get(&self, segments: &[&str]) -> Result<Value, ClientError> {
        let url = self.url(segments)?;
        debug!(url = %url, "Gateway GET");
        self.execute(self.client.get(url)).await
    }

    async fn post(&self, segments: &[&str], body: Option<&Value>) -> Result<Value, ClientError> {
        let url = self.url(segments)?;
        debug!(url = %url, "Gateway POST");
        let builder = self.client.post(url);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.execute(builder).await
    }

    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>, ClientError> {
        let body = self.get(segments).await?;
        let list = ResourceList::from_upstream(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(list.decode_items())
    }
}

/// Extracts a readable message from a gateway error body.
fn error_message(body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("error").or_else(|| v.get("message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl GatewayApi for HttpGatewayClient {
    async fn start_conversation(&self) -> Result<StartedConversation, ClientError> {
        decode(self.post(&["start"], None).await?)
    }

    async fn generate_video(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<VideoGenerationTicket, ClientError> {
        let body = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        decode(self.post(&["generate-video"], Some(&body)).await?)
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        self.list(&["conversations"]).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Conversation, ClientError> {
        decode(self.get(&["conversations", id]).await?)
    }

    async fn list_videos(&self) -> Result<Vec<VideoJob>, ClientError> {
        self.list(&["videos"]).await
    }

    async fn get_video(&self, id: &str) -> Result<VideoJob, ClientError> {
        decode(self.get(&["videos", id]).await?)
    }
}
