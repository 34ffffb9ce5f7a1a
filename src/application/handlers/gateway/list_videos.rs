//! ListVideosHandler - Query handler for the full video list.

use std::sync::Arc;

use crate::domain::gateway::{GatewayError, Operation, ResourceList};
use crate::ports::UpstreamRequest;

use super::{UpstreamRelay, API_VERSION};

/// Handler relaying the video list in the normalised envelope.
pub struct ListVideosHandler {
    relay: Arc<UpstreamRelay>,
}

impl ListVideosHandler {
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self { relay }
    }

    pub async fn handle(&self) -> Result<ResourceList, GatewayError> {
        let op = Operation::ListVideos;
        let api_key = self.relay.api_key(op)?;

        let request = UpstreamRequest::get([API_VERSION, "videos"], api_key);
        let body = self.relay.forward(op, request).await?;

        Ok(ResourceList::from_upstream_or_empty(body))
    }
}
