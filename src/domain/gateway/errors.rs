//! Gateway error taxonomy.

use serde_json::Value;
use thiserror::Error;

/// Every way a gateway operation can fail.
///
/// Handlers return these instead of panicking; the HTTP adapter maps each
/// variant onto a structured response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// A required configuration value is absent. Never retried.
    #[error("Missing required configuration: {0}")]
    Configuration(&'static str),

    /// The request was rejected locally before any outbound call.
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream rejected request with status {status}")]
    UpstreamRejected { status: u16, body: Value },

    /// The outbound call failed or its body could not be decoded.
    /// The detail is for operators only.
    #[error("Upstream transport failure: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        GatewayError::Transport(detail.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration(_))
    }
}
