//! Adapters - Implementations of port interfaces.
//!
//! - `tavus` - provider HTTP client behind the `UpstreamClient` port
//! - `http` - axum routes exposing the gateway
//! - `gateway_client` - client-side `GatewayApi` implementations

pub mod gateway_client;
pub mod http;
pub mod tavus;

pub use gateway_client::{GatewayClientConfig, HttpGatewayClient, MockGatewayApi};
pub use http::{build_app, GatewayHandlers};
pub use tavus::{MockUpstreamClient, TavusClientConfig, TavusHttpClient};
