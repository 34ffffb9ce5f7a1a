//! Tavus upstream adapters.
//!
//! - `TavusHttpClient` - reqwest client for the provider's REST API
//! - `MockUpstreamClient` - Recording mock for tests

mod http_client;
mod mock_client;

pub use http_client::{TavusClientConfig, TavusHttpClient, API_KEY_HEADER};
pub use mock_client::{MockOutcome, MockUpstreamClient};
