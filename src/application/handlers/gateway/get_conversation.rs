//! GetConversationHandler - Query handler for a single conversation snapshot.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::gateway::{GatewayError, Operation};
use crate::ports::UpstreamRequest;

use super::{resource_id, UpstreamRelay, API_VERSION};

/// Query to fetch one conversation by id.
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub conversation_id: String,
}

/// Handler relaying a conversation read verbatim.
pub struct GetConversationHandler {
    relay: Arc<UpstreamRelay>,
}

impl GetConversationHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    pub async fn handle(&self, query: GetConversationQuery) -> Result<Value, GatewayError> {
        let op = Operation::GetConversation;
        let api_key = self.relay.api_key(op)?;

        let id = resource_id(op, &query.conversation_id)?;

        let request = UpstreamRequest::get([API_VERSION, "conversations", id], api_key);
        self.relay.forward(op, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tavus::MockUpstreamClient;
    use crate::application::handlers::gateway::test_support::{configured, relay_with};
    use crate::config::UpstreamConfig;
    use serde_json::json;

    fn query(id: &str) -> GetConversationQuery {
        GetConversationQuery {
            conversation_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn passes_conversation_through_verbatim() {
        let upstream = json!({
            "conversation_id": "c-1",
            "conversation_url": "https://join/c-1",
            "status": "active",
            "anything": {"kept": true}
        });
        let mock = MockUpstreamClient::new().with_json(200, upstream.clone());
        let handler = GetConversationHandler::new(relay_with(&mock, configured()));

        let body = handler.handle(query("c-1")).await.unwrap();

        assert_eq!(body, upstream);
        assert_eq!(mock.last_call().unwrap().path(), "v2/conversations/c-1");
    }

    #[tokio::test]
    async fn needs_only_api_key() {
        let mock = MockUpstreamClient::new().with_json(200, json!({}));
        let config = UpstreamConfig {
            persona_id: None,
            replica_id: None,
            ..configured()
        };
        let handler = GetConversationHandler::new(relay_with(&mock, config));

        assert!(handler.handle(query("c-1")).await.is_ok());
    }

    #[tokio::test]
    async fn not_found_is_relayed() {
        let mock = MockUpstreamClient::new().with_json(404, json!({"message": "not found"}));
        let handler = GetConversationHandler::new(relay_with(&mock, configured()));

        let err = handler.handle(query("missing")).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::UpstreamRejected {
                status: 404,
                body: json!({"message": "not found"})
            }
        );
    }

    #[tokio::test]
    async fn dot_segment_ids_are_rejected_without_a_call() {
        for id in [".", ".."] {
            let mock = MockUpstreamClient::new().always_json(200, json!({"data": []}));
            let handler = GetConversationHandler::new(relay_with(&mock, configured()));

            let err = handler.handle(query(id)).await.unwrap_err();
            assert_eq!(err, GatewayError::validation("Invalid resource id"));
            assert_eq!(mock.call_count(), 0);
        }
    }
}
