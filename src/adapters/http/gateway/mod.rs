//! HTTP adapter for the gateway endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, StartErrorResponse, CONFIGURATION_ERROR_MESSAGE};
pub use handlers::GatewayHandlers;
pub use routes::{gateway_router, gateway_routes};
