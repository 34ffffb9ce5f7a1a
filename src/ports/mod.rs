//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `UpstreamClient` - Outbound calls from the gateway to the provider API
//! - `GatewayApi` - Calls from the client reconciliation layer to the gateway

mod gateway_api;
mod upstream_client;

pub use gateway_api::{ClientError, GatewayApi, GenerateVideoRequest};
pub use upstream_client::{
    TransportError, UpstreamClient, UpstreamMethod, UpstreamRequest, UpstreamResponse,
};
