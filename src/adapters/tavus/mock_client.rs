//! Mock upstream client for testing.
//!
//! Returns pre-configured responses in order and records every request so
//! tests can assert how many outbound calls were made and what they carried.
//!
//! # Example
//!
//! ```ignore
//! let upstream = MockUpstreamClient::new()
//!     .with_json(200, json!({"conversation_url": "https://x/y"}));
//!
//! let response = upstream.send(request).await?;
//! assert_eq!(upstream.call_count(), 1);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{TransportError, UpstreamClient, UpstreamRequest, UpstreamResponse};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Respond(UpstreamResponse),
    Fail(TransportError),
}

/// Mock upstream client.
///
/// When the queue is empty every call fails with a network error, so a test
/// that forgets to configure a response fails loudly rather than hanging.
#[derive(Debug, Clone, Default)]
pub struct MockUpstreamClient {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    repeat: Arc<Mutex<Option<MockOutcome>>>,
    calls: Arc<Mutex<Vec<UpstreamRequest>>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response.
    pub fn with_json(self, status: u16, body: Value) -> Self {
        self.with_response(UpstreamResponse::json(status, &body))
    }

    /// Queues a raw response.
    pub fn with_response(self, response: UpstreamResponse) -> Self {
        self.push(MockOutcome::Respond(response));
        self
    }

    /// Queues a transport failure.
    pub fn with_failure(self, error: TransportError) -> Self {
        self.push(MockOutcome::Fail(error));
        self
    }

    /// Answers every call not covered by the queue with this JSON response.
    pub fn always_json(self, status: u16, body: Value) -> Self {
        *self.repeat.lock().unwrap() =
            Some(MockOutcome::Respond(UpstreamResponse::json(status, &body)));
        self
    }

    fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All requests received, in order.
    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<UpstreamRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.calls.lock().unwrap().push(request);

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.repeat.lock().unwrap().clone());

        match outcome {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::Fail(error)) => Err(error),
            None => Err(TransportError::Network(
                "MockUpstreamClient has no configured response".to_string(),
            )),
        }
    }
}
