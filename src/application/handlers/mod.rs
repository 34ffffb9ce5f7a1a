//! Application handlers.
//!
//! Command and query handlers that orchestrate gateway operations.

pub mod gateway;

pub use gateway::{
    GenerateVideoCommand, GenerateVideoHandler, GetConversationHandler, GetConversationQuery,
    GetVideoHandler, GetVideoQuery, ListConversationsHandler, ListVideosHandler,
    StartConversationHandler, UpstreamRelay,
};
