//! UpstreamRelay - the forwarding contract shared by every gateway handler.
//!
//! Checks configuration preconditions, issues exactly one outbound call and
//! classifies the outcome:
//!
//! | Upstream outcome              | Result                                   |
//! |-------------------------------|------------------------------------------|
//! | success + JSON body           | `Ok(body)`                               |
//! | success + non-JSON body       | `GatewayError::Transport`                |
//! | non-success + JSON body       | `GatewayError::UpstreamRejected` verbatim |
//! | non-success + non-JSON body   | `UpstreamRejected` with a synthesized body |
//! | transport failure             | `GatewayError::Transport`                |

use std::sync::Arc;

use secrecy::Secret;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::config::UpstreamConfig;
use crate::domain::gateway::{GatewayError, Operation};
use crate::ports::{UpstreamClient, UpstreamRequest};

/// Error body used when upstream fails with something that is not JSON.
pub const INVALID_UPSTREAM_RESPONSE: &str = "Invalid response from upstream API";

/// Message returned for ids that cannot name a single resource.
pub const INVALID_RESOURCE_ID: &str = "Invalid resource id";

/// Rejects ids a URL would resolve as dot segments, which would turn a
/// single-resource read into a read of the parent collection.
pub fn resource_id(op: Operation, id: &str) -> Result<&str, GatewayError> {
    if id.is_empty() || id == "." || id == ".." {
        warn!(operation = %op, id, "Rejected path id");
        return Err(GatewayError::validation(INVALID_RESOURCE_ID));
    }
    Ok(id)
}

/// Shared outbound path for gateway handlers. Holds no mutable state.
pub struct UpstreamRelay {
    client: Arc<dyn UpstreamClient>,
    config: Arc<UpstreamConfig>,
}

impl UpstreamRelay {
    pub fn new(client: Arc<dyn UpstreamClient>, config: Arc<UpstreamConfig>) -> Self {
        Self { client, config }
    }

    /// The API key, or a configuration error.
    pub fn api_key(&self, op: Operation) -> Result<Secret<String>, GatewayError> {
        self.config
            .api_key()
            .cloned()
            .ok_or_else(|| missing(op, "api_key"))
    }

    /// The persona id, or a configuration error.
    pub fn persona_id(&self, op: Operation) -> Result<String, GatewayError> {
        self.config
            .persona_id()
            .map(str::to_string)
            .ok_or_else(|| missing(op, "persona_id"))
    }

    /// The replica id, or a configuration error.
    pub fn replica_id(&self, op: Operation) -> Result<String, GatewayError> {
        self.config
            .replica_id()
            .map(str::to_string)
            .ok_or_else(|| missing(op, "replica_id"))
    }

    /// Sends one request upstream and classifies the response.
    pub async fn forward(&self, op: Operation, request: UpstreamRequest) -> Result<Value, GatewayError> {
        debug!(
            operation = %op,
            method = ?request.method,
            path = %request.path(),
            body = ?request.body,
            "Forwarding request upstream"
        );

        let response = self.client.send(request).await.map_err(|e| {
            error!(operation = %op, error = %e, "Upstream request failed");
            GatewayError::transport(e.to_string())
        })?;

        debug!(operation = %op, status = response.status, "Upstream responded");

        match (response.is_success(), response.json_body()) {
            (true, Some(body)) => Ok(body),
            (true, None) => {
                error!(
                    operation = %op,
                    status = response.status,
                    content_type = ?response.content_type,
                    "Upstream returned a success status with a non-JSON body"
                );
                Err(GatewayError::transport("non-JSON success body"))
            }
            (false, Some(body)) => {
                warn!(operation = %op, status = response.status, body = %body, "Upstream rejected request");
                Err(GatewayError::UpstreamRejected {
                    status: response.status,
                    body,
                })
            }
            (false, None) => {
                warn!(
                    operation = %op,
                    status = response.status,
                    content_type = ?response.content_type,
                    "Upstream rejected request with a non-JSON body"
                );
                Err(GatewayError::UpstreamRejected {
                    status: response.status,
                    body: json!({ "error": INVALID_UPSTREAM_RESPONSE }),
                })
            }
        }
    }
}

fn missing(op: Operation, field: &'static str) -> GatewayError {
    warn!(operation = %op, field, "Missing required configuration");
    GatewayError::Configuration(field)
}
