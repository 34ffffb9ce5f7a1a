//! HTTP routes for the gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_video, get_conversation, get_video, list_conversations, list_videos,
    start_conversation, GatewayHandlers,
};

/// Gateway routes, awaiting their handler state.
pub fn gateway_routes() -> Router<GatewayHandlers> {
    Router::new()
        .route("/start", post(start_conversation))
        .route("/generate-video", post(generate_video))
        .route("/conversations", get(list_conversations))
        .route("/conversations/:id", get(get_conversation))
        .route("/videos", get(list_videos))
        .route("/videos/:id", get(get_video))
}

/// Creates the gateway router with all endpoints.
pub fn gateway_router(handlers: GatewayHandlers) -> Router {
    gateway_routes().with_state(handlers)
}
