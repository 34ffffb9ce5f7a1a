//! StartConversationHandler - Command handler for creating a live conversation.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::conversation::StartedConversation;
use crate::domain::gateway::{GatewayError, Operation};
use crate::ports::UpstreamRequest;

use super::{UpstreamRelay, API_VERSION};

/// Handler for starting a conversation with the configured persona and replica.
pub struct StartConversationHandler {
    relay: Arc<UpstreamRelay>,
}

impl StartConversationHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    /// Creates the conversation upstream and returns only its join URL and id.
    pub async fn handle(&self) -> Result<StartedConversation, GatewayError> {
        let op = Operation::StartConversation;
        let api_key = self.relay.api_key(op)?;
        let persona_id = self.relay.persona_id(op)?;
        let replica_id = self.relay.replica_id(op)?;

        let body = json!({
            "persona_id": persona_id,
            "replica_id": replica_id,
        });
        let request = UpstreamRequest::post([API_VERSION, "conversations"], body, api_key);

        let response = self.relay.forward(op, request).await?;
        let started = StartedConversation::from_upstream(&response);

        if started.conversation_url.is_none() {
            warn!(operation = %op, "Upstream response carried no conversation_url");
        }
        info!(conversation_id = ?started.conversation_id, "Conversation started");

        Ok(started)
    }
}
