//! Gateway client adapters - implementations of the `GatewayApi` port.

mod http_client;
mod mock_api;

pub use http_client::{GatewayClientConfig, HttpGatewayClient};
pub use mock_api::MockGatewayApi;
