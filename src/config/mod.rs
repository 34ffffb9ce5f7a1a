//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CVI_GATEWAY` prefix and nested values use double underscores as separators.
//!
//! The provider's conventional variable names (`TAVUS_API_KEY`,
//! `TAVUS_PERSONA_ID`, `TAVUS_REPLICA_ID`, `TAVUS_API_BASE`) are honoured as
//! overrides for the upstream section.
//!
//! # Example
//!
//! ```no_run
//! use cvi_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let addr = config.server.socket_addr().expect("Invalid bind address");
//! println!("Server running on {}", addr);
//! ```

mod error;
mod server;
mod upstream;

pub use error::{ConfigError, ValidationError};
pub use server::{CorsPolicy, Environment, ServerConfig};
pub use upstream::{UpstreamConfig, DEFAULT_BASE_URL};

use serde::Deserialize;

/// Provider variable names mapped onto the upstream section.
const PROVIDER_ENV_OVERRIDES: [(&str, &str); 4] = [
    ("TAVUS_API_KEY", "upstream.api_key"),
    ("TAVUS_PERSONA_ID", "upstream.persona_id"),
    ("TAVUS_REPLICA_ID", "upstream.replica_id"),
    ("TAVUS_API_BASE", "upstream.base_url"),
];

/// Root application configuration
///
/// Constructed once at process start and handed to every handler; nothing
/// reads the environment after [`AppConfig::load()`] returns.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider configuration (credentials, base URL)
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CVI_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies the provider's conventional variable names on top
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CVI_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CVI_GATEWAY__UPSTREAM__REPLICA_ID=...` -> `upstream.replica_id = ...`
    /// - `TAVUS_API_KEY=...` -> `upstream.api_key = ...`
    ///
    /// Missing credentials are not an error here; see
    /// [`UpstreamConfig::missing_fields`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("CVI_GATEWAY")
                .separator("__"),
        );

        for (var, key) in PROVIDER_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port and timeout ranges
    /// - Upstream timeout strictly below the request timeout
    /// - Upstream base URL scheme
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.upstream.validate()?;
        if self.upstream.timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::UpstreamTimeoutNotBelowRequestTimeout {
                upstream_secs: self.upstream.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 10] = [
        "CVI_GATEWAY__UPSTREAM__API_KEY",
        "CVI_GATEWAY__UPSTREAM__PERSONA_ID",
        "CVI_GATEWAY__UPSTREAM__REPLICA_ID",
        "CVI_GATEWAY__UPSTREAM__BASE_URL",
        "CVI_GATEWAY__SERVER__PORT",
        "CVI_GATEWAY__SERVER__ENVIRONMENT",
        "TAVUS_API_KEY",
        "TAVUS_PERSONA_ID",
        "TAVUS_REPLICA_ID",
        "TAVUS_API_BASE",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_no_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert!(config.upstream.api_key().is_none());
    }

    #[test]
    fn test_load_prefixed_upstream_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CVI_GATEWAY__UPSTREAM__API_KEY", "key-123");
        env::set_var("CVI_GATEWAY__UPSTREAM__REPLICA_ID", "r-1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.upstream.api_key().is_some());
        assert_eq!(config.upstream.replica_id(), Some("r-1"));
        assert_eq!(config.upstream.persona_id(), None);
    }

    #[test]
    fn test_provider_variable_names_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CVI_GATEWAY__UPSTREAM__PERSONA_ID", "p-prefixed");
        env::set_var("TAVUS_PERSONA_ID", "p-provider");
        env::set_var("TAVUS_API_BASE", "http://localhost:9999");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.upstream.persona_id(), Some("p-provider"));
        assert_eq!(config.upstream.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CVI_GATEWAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CVI_GATEWAY__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_upstream_timeout_must_be_below_request_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 5;
        config.upstream.timeout_secs = 60;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UpstreamTimeoutNotBelowRequestTimeout {
                upstream_secs: 60,
                request_secs: 5
            })
        ));

        config.upstream.timeout_secs = 5;
        assert!(config.validate().is_err());

        config.upstream.timeout_secs = 4;
        assert!(config.validate().is_ok());
    }
}
