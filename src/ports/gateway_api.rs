//! Gateway API Port - what the client reconciliation layer needs from the gateway.
//!
//! Implementations talk to the gateway's JSON surface and return typed
//! snapshots. Shape normalisation happens at the gateway, so implementations
//! only ever decode the `{data: [...]}` list envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::conversation::{Conversation, StartedConversation};
use crate::domain::video::{VideoGenerationTicket, VideoJob};

/// Port for calling the gateway from the client side.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn start_conversation(&self) -> Result<StartedConversation, ClientError>;

    async fn generate_video(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<VideoGenerationTicket, ClientError>;

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError>;

    async fn get_conversation(&self, id: &str) -> Result<Conversation, ClientError>;

    async fn list_videos(&self) -> Result<Vec<VideoJob>, ClientError>;

    async fn get_video(&self, id: &str) -> Result<VideoJob, ClientError>;
}

/// Body of a generate-video call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_name: Option<String>,
}

impl GenerateVideoRequest {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: Some(script.into()),
            video_name: None,
        }
    }

    pub fn with_video_name(mut self, name: impl Into<String>) -> Self {
        self.video_name = Some(name.into());
        self
    }

    /// The script with surrounding whitespace removed, if anything remains.
    pub fn trimmed_script(&self) -> Option<&str> {
        self.script.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The requested name, treating an empty string as absent.
    pub fn requested_name(&self) -> Option<&str> {
        self.video_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Client-side failures when calling the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally, no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The gateway answered with a non-success status.
    #[error("Gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode gateway response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_script_is_treated_as_missing() {
        assert_eq!(GenerateVideoRequest::new("   \n\t").trimmed_script(), None);
        assert_eq!(GenerateVideoRequest::default().trimmed_script(), None);
        assert_eq!(GenerateVideoRequest::new(" hi ").trimmed_script(), Some("hi"));
    }

    #[test]
    fn empty_name_is_treated_as_absent() {
        let request = GenerateVideoRequest::new("hi").with_video_name("");
        assert_eq!(request.requested_name(), None);
    }

    #[test]
    fn request_serializes_without_absent_fields() {
        let json = serde_json::to_value(GenerateVideoRequest::new("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"script": "hello"}));
    }
}
