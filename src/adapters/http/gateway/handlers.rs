//! HTTP handlers for the gateway endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::application::handlers::gateway::{
    GenerateVideoHandler, GetConversationHandler, GetConversationQuery, GetVideoHandler,
    GetVideoQuery, ListConversationsHandler, ListVideosHandler, StartConversationHandler,
    UpstreamRelay,
};
use crate::config::UpstreamConfig;
use crate::domain::gateway::{GatewayError, Operation};
use crate::ports::UpstreamClient;

use super::dto::{ErrorResponse, GenerateVideoBody, StartErrorResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GatewayHandlers {
    start_handler: Arc<StartConversationHandler>,
    generate_handler: Arc<GenerateVideoHandler>,
    list_conversations_handler: Arc<ListConversationsHandler>,
    get_conversation_handler: Arc<GetConversationHandler>,
    list_videos_handler: Arc<ListVideosHandler>,
    get_video_handler: Arc<GetVideoHandler>,
}

impl GatewayHandlers {
    /// Builds every handler over one shared relay.
    pub fn new(relay: Arc<UpstreamRelay>) -> Self {
        Self {
            start_handler: Arc::new(StartConversationHandler::new(relay.clone())),
            generate_handler: Arc::new(GenerateVideoHandler::new(relay.clone())),
            list_conversations_handler: Arc::new(ListConversationsHandler::new(relay.clone())),
            get_conversation_handler: Arc::new(GetConversationHandler::new(relay.clone())),
            list_videos_handler: Arc::new(ListVideosHandler::new(relay.clone())),
            get_video_handler: Arc::new(GetVideoHandler::new(relay)),
        }
    }

    pub fn from_parts(client: Arc<dyn UpstreamClient>, config: UpstreamConfig) -> Self {
        Self::new(Arc::new(UpstreamRelay::new(client, Arc::new(config))))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /start - Start a live conversation
pub async fn start_conversation(State(handlers): State<GatewayHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(started) => (StatusCode::OK, Json(started)).into_response(),
        Err(e) => handle_start_error(e),
    }
}

/// POST /generate-video - Start a video generation job
pub async fn generate_video(State(handlers): State<GatewayHandlers>, body: Bytes) -> Response {
    let cmd = GenerateVideoBody::from_bytes(&body).into();

    match handlers.generate_handler.handle(cmd).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket)).into_response(),
        Err(e) => handle_gateway_error(Operation::GenerateVideo, e),
    }
}

/// GET /conversations - List conversations
pub async fn list_conversations(State(handlers): State<GatewayHandlers>) -> Response {
    match handlers.list_conversations_handler.handle().await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => handle_gateway_error(Operation::ListConversations, e),
    }
}

/// GET /conversations/:id - Fetch one conversation
pub async fn get_conversation(
    State(handlers): State<GatewayHandlers>,
    Path(conversation_id): Path<String>,
) -> Response {
    let query = GetConversationQuery { conversation_id };

    match handlers.get_conversation_handler.handle(query).await {
        Ok(body) => passthrough(body),
        Err(e) => handle_gateway_error(Operation::GetConversation, e),
    }
}

/// GET /videos - List video jobs
pub async fn list_videos(State(handlers): State<GatewayHandlers>) -> Response {
    match handlers.list_videos_handler.handle().await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => handle_gateway_error(Operation::ListVideos, e),
    }
}

/// GET /videos/:id - Fetch one video job
pub async fn get_video(
    State(handlers): State<GatewayHandlers>,
    Path(video_id): Path<String>,
) -> Response {
    let query = GetVideoQuery { video_id };

    match handlers.get_video_handler.handle(query).await {
        Ok(body) => passthrough(body),
        Err(e) => handle_gateway_error(Operation::GetVideo, e),
    }
}

fn passthrough(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn handle_gateway_error(operation: Operation, error: GatewayError) -> Response {
    match error {
        GatewayError::Configuration(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::configuration()),
        )
            .into_response(),
        GatewayError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
        }
        GatewayError::UpstreamRejected { status, body } => {
            (upstream_status(status), Json(body)).into_response()
        }
        GatewayError::Transport(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(operation.failure_message())),
        )
            .into_response(),
    }
}

fn handle_start_error(error: GatewayError) -> Response {
    let message = match error {
        GatewayError::UpstreamRejected { status, body } => {
            return (upstream_status(status), Json(body)).into_response()
        }
        GatewayError::Configuration(_) => super::dto::CONFIGURATION_ERROR_MESSAGE.to_string(),
        GatewayError::Validation(message) => {
            return (StatusCode::BAD_REQUEST, Json(StartErrorResponse::new(message)))
                .into_response()
        }
        GatewayError::Transport(_) => Operation::StartConversation.failure_message().to_string(),
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StartErrorResponse::new(message)),
    )
        .into_response()
}
