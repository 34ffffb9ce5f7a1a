//! Conversation resources mirrored from the upstream provider.
//!
//! The gateway never owns conversation state. These types describe the
//! point-in-time snapshots it relays and the client renders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream-defined conversation status.
///
/// The set is open-ended; unrecognised values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConversationStatus {
    Active,
    Ended,
    Other(String),
}

impl ConversationStatus {
    /// Returns true once no further change is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationStatus::Ended)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConversationStatus::Active => "active",
            ConversationStatus::Ended => "ended",
            ConversationStatus::Other(s) => s,
        }
    }
}

impl Default for ConversationStatus {
    fn default() -> Self {
        ConversationStatus::Other("unknown".to_string())
    }
}

impl From<String> for ConversationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => ConversationStatus::Active,
            "ended" => ConversationStatus::Ended,
            _ => ConversationStatus::Other(value),
        }
    }
}

impl From<ConversationStatus> for String {
    fn from(status: ConversationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A conversation as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "conversation_id", alias = "id")]
    pub id: String,

    #[serde(
        rename = "conversation_name",
        alias = "name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub status: ConversationStatus,

    /// Join URL for the embedded live view.
    #[serde(
        rename = "conversation_url",
        alias = "url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

impl Conversation {
    /// The join URL, if the provider supplied a usable one.
    pub fn join_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Result of starting a conversation: only the join URL and id survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedConversation {
    pub conversation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl StartedConversation {
    /// Extracts the join URL and id from a provider response, dropping everything else.
    pub fn from_upstream(body: &serde_json::Value) -> Self {
        let field = |name: &str| body.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            conversation_url: field("conversation_url"),
            conversation_id: field("conversation_id"),
        }
    }
}
