//! Application layer - Commands, Queries, and Handlers.
//!
//! Gateway handlers translate one inbound request into one upstream call.
//! The reconciliation module drives those operations from the client side.

pub mod handlers;
pub mod reconciliation;

pub use handlers::{
    GenerateVideoCommand, GenerateVideoHandler, GetConversationHandler, GetConversationQuery,
    GetVideoHandler, GetVideoQuery, ListConversationsHandler, ListVideosHandler,
    StartConversationHandler, UpstreamRelay,
};
pub use reconciliation::{Dashboard, PollHandle, RejoinOutcome, ViewState};
