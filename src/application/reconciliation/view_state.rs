//! Transient view state held by the client.
//!
//! Never the source of truth: every field is overwritten by the next
//! successful read through the gateway.

use serde::Serialize;

use crate::domain::conversation::Conversation;
use crate::domain::video::VideoJob;

/// Which surface the view is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    /// Embedded live conversation.
    Live { url: String },
}

/// Inputs of the generate-video form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoDraft {
    pub script: String,
    pub video_name: String,
}

/// Everything the rendering layer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub conversations: Vec<Conversation>,
    pub videos: Vec<VideoJob>,
    pub mode: ViewMode,
    /// Conversation to highlight among history.
    pub highlighted_conversation: Option<String>,
    pub draft: VideoDraft,
    /// Last non-blocking notice to surface.
    pub notice: Option<String>,
    pub starting: bool,
    pub generating: bool,
}

impl ViewState {
    /// True while any known video job is queued or processing.
    pub fn has_pending_videos(&self) -> bool {
        self.videos.iter().any(VideoJob::is_pending)
    }

    pub fn pending_video_count(&self) -> usize {
        self.videos.iter().filter(|v| v.is_pending()).count()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, ViewMode::Live { .. })
    }

    pub fn live_url(&self) -> Option<&str> {
        match &self.mode {
            ViewMode::Live { url } => Some(url),
            ViewMode::List => None,
        }
    }
}
