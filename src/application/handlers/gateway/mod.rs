//! Gateway handlers - one stateless handler per upstream operation.
//!
//! Each handler checks the configuration values it needs, issues exactly one
//! outbound call through [`UpstreamRelay`], and reshapes the result where the
//! operation calls for it. No handler retries.

mod generate_video;
mod get_conversation;
mod get_video;
mod list_conversations;
mod list_videos;
mod relay;
mod start_conversation;

pub use generate_video::{GenerateVideoCommand, GenerateVideoHandler, SCRIPT_REQUIRED};
pub use get_conversation::{GetConversationHandler, GetConversationQuery};
pub use get_video::{GetVideoHandler, GetVideoQuery};
pub use list_conversations::ListConversationsHandler;
pub use list_videos::ListVideosHandler;
pub use relay::{resource_id, UpstreamRelay, INVALID_RESOURCE_ID, INVALID_UPSTREAM_RESPONSE};
pub use start_conversation::StartConversationHandler;

/// Provider API version prefix.
pub const API_VERSION: &str = "v2";
