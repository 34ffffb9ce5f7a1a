//! DTOs for the gateway HTTP surface.

use serde::{Deserialize, Serialize};

use crate::application::handlers::gateway::GenerateVideoCommand;

/// Message returned whenever required configuration is missing.
pub const CONFIGURATION_ERROR_MESSAGE: &str = "Missing required configuration";

/// Body of `POST /generate-video`. Every field is optional so the handler,
/// not the extractor, decides what a missing script means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateVideoBody {
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub video_name: Option<String>,
}

impl GenerateVideoBody {
    /// Parses a raw body, treating anything unparseable as empty.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

impl From<GenerateVideoBody> for GenerateVideoCommand {
    fn from(body: GenerateVideoBody) -> Self {
        Self {
            script: body.script,
            video_name: body.video_name,
        }
    }
}

/// Generic failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn configuration() -> Self {
        Self::new(CONFIGURATION_ERROR_MESSAGE)
    }
}

/// Failure body of `POST /start`; the URL is always present and null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartErrorResponse {
    pub error: String,
    pub conversation_url: Option<String>,
}

impl StartErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            conversation_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
