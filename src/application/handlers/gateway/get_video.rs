//! GetVideoHandler - Query handler for a single video snapshot.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::gateway::{GatewayError, Operation};
use crate::ports::UpstreamRequest;

use super::{resource_id, UpstreamRelay, API_VERSION};

/// Query to fetch one video by id.
#[derive(Debug, Clone)]
pub struct GetVideoQuery {
    pub video_id: String,
}

/// Handler relaying a video read verbatim.
pub struct GetVideoHandler {
    relay: Arc<UpstreamRelay>,
}

impl GetVideoHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    pub async fn handle(&self, query: GetVideoQuery) -> Result<Value, GatewayError> {
        let op = Operation::GetVideo;
        let api_key = self.relay.api_key(op)?;

        let id = resource_id(op, &query.video_id)?;

        let request = UpstreamRequest::get([API_VERSION, "videos", id], api_key);
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

    fn query(id: &str) -> GetVideoQuery {
        GetVideoQuery {
            video_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let upstream = json!({"video_id": "v-1", "status": "processing"});
        let mock = MockUpstreamClient::new().always_json(200, upstream.clone());
        let handler = GetVideoHandler::new(relay_with(&mock, configured()));

        let first = handler.handle(query("v-1")).await.unwrap();
        let second = handler.handle(query("v-1")).await.unwrap();

        assert_eq!(first, upstream);
        assert_eq!(first, second);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn missing_key_makes_no_call() {
        let mock = MockUpstreamClient::new().always_json(200, json!({}));
        let handler = GetVideoHandler::new(relay_with(&mock, UpstreamConfig::default()));

        let err = handler.handle(query("v-1")).await.unwrap_err();
        assert_eq!(err, GatewayError::Configuration("api_key"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn dot_segment_ids_are_rejected_without_a_call() {
        for id in [".", ".."] {
            let mock = MockUpstreamClient::new().always_json(200, json!([]));
            let handler = GetVideoHandler::new(relay_with(&mock, configured()));

            let err = handler.handle(query(id)).await.unwrap_err();
            assert_eq!(err, GatewayError::validation("Invalid resource id"));
            assert_eq!(mock.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn ids_containing_dots_are_forwarded() {
        let mock = MockUpstreamClient::new().always_json(200, json!({}));
        let handler = GetVideoHandler::new(relay_with(&mock, configured()));

        handler.handle(query("...")).await.unwrap();
        assert_eq!(mock.last_call().unwrap().path(), "v2/videos/...");
    }
}
