//! The six upstream operations exposed by the gateway.

use std::fmt;

/// A logical gateway operation, one per upstream resource action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    StartConversation,
    GenerateVideo,
    GetConversation,
    ListConversations,
    GetVideo,
    ListVideos,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::StartConversation,
        Operation::GenerateVideo,
        Operation::GetConversation,
        Operation::ListConversations,
        Operation::GetVideo,
        Operation::ListVideos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::StartConversation => "start_conversation",
            Operation::GenerateVideo => "generate_video",
            Operation::GetConversation => "get_conversation",
            Operation::ListConversations => "list_conversations",
            Operation::GetVideo => "get_video",
            Operation::ListVideos => "list_videos",
        }
    }

    /// Generic message returned to callers when the outbound call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::StartConversation => "Failed to start conversation",
            Operation::GenerateVideo => "Failed to generate video",
            Operation::GetConversation => "Failed to fetch conversation",
            Operation::ListConversations => "Failed to fetch conversations",
            Operation::GetVideo => "Failed to fetch video",
            Operation::ListVideos => "Failed to fetch videos",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
