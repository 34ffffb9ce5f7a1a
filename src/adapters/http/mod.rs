//! HTTP adapters - REST API implementations.
//!
//! The gateway router is mounted under `/api`; `build_app` adds the health
//! check and the tower-http layers shared by every route.

pub mod gateway;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{CorsPolicy, ServerConfig};

pub use gateway::{gateway_router, gateway_routes, GatewayHandlers};

/// Path prefix the gateway routes are mounted under.
pub const API_PREFIX: &str = "/api";

/// Assembles the full application router.
pub fn build_app(handlers: GatewayHandlers, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, gateway_router(handlers))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness check
async fn health() -> Json<gateway::dto::HealthResponse> {
    Json(gateway::dto::HealthResponse { status: "ok" })
}

/// Translates the configured policy into a tower-http layer.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = match server.cors_policy() {
        CorsPolicy::Permissive => return CorsLayer::permissive(),
        CorsPolicy::SameOrigin => return CorsLayer::new(),
        CorsPolicy::Origins(origins) => origins,
    };

    let origins: Vec<HeaderValue> = origins
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::tavus::MockUpstreamClient;
    use crate::config::{Environment, UpstreamConfig};

    fn app(mock: &MockUpstreamClient, server: &ServerConfig) -> Router {
        let handlers = GatewayHandlers::from_parts(
            Arc::new(mock.clone()),
            UpstreamConfig::new("k", "p", "r"),
        );
        build_app(handlers, server)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(&MockUpstreamClient::new(), &ServerConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn gateway_is_mounted_under_api() {
        let mock = MockUpstreamClient::new().with_json(200, json!([]));
        let app = app(&mock, &ServerConfig::default());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/videos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/videos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            environment: Environment::Production,
            ..Default::default()
        };

        let response = app(&MockUpstreamClient::new(), &server)
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/start")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
