//! Upstream provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Production endpoint of the conversational video provider.
pub const DEFAULT_BASE_URL: &str = "https://tavusapi.com";

/// Upstream provider configuration
///
/// Credentials are optional at load time. Handlers check the values they need
/// per request and answer with a configuration error when one is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Secret key sent in the `x-api-key` header
    pub api_key: Option<Secret<String>>,

    /// Persona used when starting conversations
    pub persona_id: Option<String>,

    /// Replica used for conversations and video generation
    pub replica_id: Option<String>,

    /// Base URL of the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Creates a fully credentialed configuration against the default endpoint.
    pub fn new(
        api_key: impl Into<String>,
        persona_id: impl Into<String>,
        replica_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
            persona_id: Some(persona_id.into()),
            replica_id: Some(replica_id.into()),
            ..Default::default()
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the outbound timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if present and non-empty.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// The persona id, if present and non-empty.
    pub fn persona_id(&self) -> Option<&str> {
        non_empty(self.persona_id.as_deref())
    }

    /// The replica id, if present and non-empty.
    pub fn replica_id(&self) -> Option<&str> {
        non_empty(self.replica_id.as_deref())
    }

    /// Names of credential fields that are absent. Never includes values.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key().is_none() {
            missing.push("api_key");
        }
        if self.persona_id().is_none() {
            missing.push("persona_id");
        }
        if self.replica_id().is_none() {
            missing.push("replica_id");
        }
        missing
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidUpstreamTimeout);
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            persona_id: None,
            replica_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Kept below the server's default request timeout so upstream stalls
/// surface as structured transport failures.
fn default_timeout() -> u64 {
    20
}
