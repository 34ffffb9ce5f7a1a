//! GenerateVideoHandler - Command handler for starting a video generation job.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::gateway::{GatewayError, Operation};
use crate::domain::video::VideoGenerationTicket;
use crate::ports::{GenerateVideoRequest, UpstreamRequest};

use super::{UpstreamRelay, API_VERSION};

/// Message returned when the script is empty or absent.
pub const SCRIPT_REQUIRED: &str = "Script is required";

/// Command to generate a video from a text script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateVideoCommand {
    pub script: Option<String>,
    pub video_name: Option<String>,
}

impl GenerateVideoCommand {
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
}

impl From<GenerateVideoRequest> for GenerateVideoCommand {
    fn from(request: GenerateVideoRequest) -> Self {
        Self {
            script: request.script,
            video_name: request.video_name,
        }
    }
}

/// Handler for video generation requests.
pub struct GenerateVideoHandler {
    relay: Arc<UpstreamRelay>,
}

impl GenerateVideoHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    pub async fn handle(&self, cmd: GenerateVideoCommand) -> Result<VideoGenerationTicket, GatewayError> {
        let op = Operation::GenerateVideo;
        let api_key = self.relay.api_key(op)?;
        let replica_id = self.relay.replica_id(op)?;

        // Rejected before any outbound call.
        let script = cmd
            .script
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                debug!(operation = %op, "Rejecting request without a script");
                GatewayError::validation(SCRIPT_REQUIRED)
            })?;
        let video_name = cmd.video_name.filter(|n| !n.is_empty());

        let mut body = json!({
            "replica_id": replica_id,
            "script": script,
        });
        if let Some(name) = &video_name {
            body["video_name"] = json!(name);
        }

        let request = UpstreamRequest::post([API_VERSION, "videos"], body, api_key);
        let response = self.relay.forward(op, request).await?;
        let ticket = VideoGenerationTicket::from_upstream(&response, video_name.as_deref());

        info!(
            video_id = ?ticket.video_id,
            status = ?ticket.status,
            video_name = %ticket.video_name,
            "Video generation started"
        );

        Ok(ticket)
    }
}
