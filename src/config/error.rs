//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid upstream timeout")]
    InvalidUpstreamTimeout,

    #[error("Upstream timeout ({upstream_secs}s) must be below the request timeout ({request_secs}s)")]
    UpstreamTimeoutNotBelowRequestTimeout { upstream_secs: u64, request_secs: u64 },

    #[error("Upstream base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),
}
