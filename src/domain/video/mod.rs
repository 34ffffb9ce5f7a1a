//! Video generation jobs mirrored from the upstream provider.
//!
//! Jobs advance asynchronously on the provider side. The client learns a new
//! status only by re-reading, and never validates transitions locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to generated videos when the caller supplies none.
pub const DEFAULT_VIDEO_NAME: &str = "Generated Video";

/// Upstream-defined video job status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VideoStatus {
    Queued,
    Processing,
    Completed,
    Other(String),
}

impl VideoStatus {
    /// Returns true once no further change is expected.
    ///
    /// Only `queued` and `processing` are in flight; every other value,
    /// including unrecognised ones, is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VideoStatus::Queued | VideoStatus::Processing)
    }

    pub fn as_str(&self) -> &str {
        match self {
            VideoStatus::Queued => "queued",
            VideoStatus::Processing => "processing",
            VideoStatus::Completed => "completed",
            VideoStatus::Other(s) => s,
        }
    }
}

impl Default for VideoStatus {
    fn default() -> Self {
        VideoStatus::Other("unknown".to_string())
    }
}

impl From<String> for VideoStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => VideoStatus::Queued,
            "processing" => VideoStatus::Processing,
            "completed" => VideoStatus::Completed,
            _ => VideoStatus::Other(value),
        }
    }
}

impl From<VideoStatus> for String {
    fn from(status: VideoStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A video job as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoJob {
    #[serde(rename = "video_id", alias = "id")]
    pub id: String,

    #[serde(
        rename = "video_name",
        alias = "name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(default)]
    pub status: VideoStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

impl VideoJob {
    pub fn is_pending(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Acknowledgement returned once a generation job has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGenerationTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,

    pub video_name: String,

    pub message: String,
}

impl VideoGenerationTicket {
    /// Builds a ticket from the provider's create response.
    pub fn from_upstream(body: &serde_json::Value, requested_name: Option<&str>) -> Self {
        Self {
            video_id: body
                .get("video_id")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            status: body
                .get("status")
                .and_then(|v| v.as_str())
                .map(|s| VideoStatus::from(s.to_string())),
            video_name: requested_name.unwrap_or(DEFAULT_VIDEO_NAME).to_string(),
            message: "Video generation started".to_string(),
        }
    }
}
