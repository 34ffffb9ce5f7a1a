//! ListConversationsHandler - Query handler for the full conversation list.

use std::sync::Arc;

use crate::domain::gateway::{GatewayError, Operation, ResourceList};
use crate::ports::UpstreamRequest;

use super::{UpstreamRelay, API_VERSION};

/// Handler relaying the conversation list in the normalised envelope.
pub struct ListConversationsHandler {
    relay: Arc<UpstreamRelay>,
}

impl ListConversationsHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    pub async fn handle(&self) -> Result<ResourceList, GatewayError> {
        let op = Operation::ListConversations;
        let api_key = self.relay.api_key(op)?;

        let request = UpstreamRequest::get([API_VERSION, "conversations"], api_key);
        let body = self.relay.forward(op, request).await?;

        Ok(ResourceList::from_upstream_or_empty(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tavus::MockUpstreamClient;
    use crate::application::handlers::gateway::test_support::{configured, relay_with};
    use serde_json::json;

    #[tokio::test]
    async fn bare_array_is_wrapped() {
        let item = json!({"conversation_id": "c-1", "status": "ended"});
        let mock = MockUpstreamClient::new().with_json(200, json!([item.clone()]));
        let handler = ListConversationsHandler::new(relay_with(&mock, configured()));

        let list = handler.handle().await.unwrap();

        assert_eq!(list.data, vec![item]);
        assert_eq!(mock.last_call().unwrap().path(), "v2/conversations");
    }

    #[tokio::test]
    async fn named_wrapper_is_unwrapped() {
        let mock = MockUpstreamClient::new()
            .with_json(200, json!({"conversations": [{"conversation_id": "c-1"}]}));
        let handler = ListConversationsHandler::new(relay_with(&mock, configured()));

        assert_eq!(handler.handle().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_shape_is_an_empty_list() {
        let mock = MockUpstreamClient::new().with_json(200, json!({"unexpected": true}));
        let handler = ListConversationsHandler::new(relay_with(&mock, configured()));

        let list = handler.handle().await.unwrap();
        assert!(list.is_empty());
        assert_eq!(list.total_count, None);
    }
}
