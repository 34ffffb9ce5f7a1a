//! Shared test infrastructure: a fake provider and a served gateway.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use cvi_gateway::adapters::http::build_app;
use cvi_gateway::adapters::tavus::{TavusClientConfig, TavusHttpClient};
use cvi_gateway::adapters::GatewayHandlers;
use cvi_gateway::config::{ServerConfig, UpstreamConfig};

pub const API_KEY: &str = "provider-key";

/// A request the fake provider received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

/// In-process stand-in for the provider API.
#[derive(Clone, Default)]
pub struct FakeProvider {
    requests: Arc<Mutex<Vec<Recorded>>>,
    video_list_calls: Arc<AtomicUsize>,
    /// Video list reads that still report the job as processing.
    processing_reads: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processing_for(self, reads: usize) -> Self {
        self.processing_reads.store(reads, Ordering::SeqCst);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn video_list_calls(&self) -> usize {
        self.video_list_calls.load(Ordering::SeqCst)
    }

    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            api_key: headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
    }

    fn router(self) -> Router {
        Router::new()
            .route("/v2/conversations", get(list_conversations).post(create_conversation))
            .route("/v2/conversations/:id", get(get_conversation))
            .route("/v2/videos", get(list_videos).post(create_video))
            .route("/v2/videos/:id", get(get_video))
            .with_state(self)
    }
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    (key != Some(API_KEY)).then(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid access token"})),
        )
            .into_response()
    })
}

async fn create_conversation(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.record("POST", "/v2/conversations".to_string(), &headers, Some(body));
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    Json(json!({
        "conversation_id": "c-new",
        "conversation_url": "https://tavus.daily.co/c-new",
        "status": "active",
        "callback_url": "https://internal.example"
    }))
    .into_response()
}

async fn list_conversations(State(fake): State<FakeProvider>, headers: HeaderMap) -> Response {
    fake.record("GET", "/v2/conversations".to_string(), &headers, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    Json(json!({
        "data": [
            {"conversation_id": "c-new", "conversation_name": "Demo", "status": "active",
             "conversation_url": "https://tavus.daily.co/c-new", "created_at": "2024-05-01T10:00:00Z"},
            {"conversation_id": "c-old", "status": "ended", "created_at": "2024-04-01T10:00:00Z"}
        ],
        "total_count": 2
    }))
    .into_response()
}

async fn get_conversation(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    fake.record("GET", format!("/v2/conversations/{}", id), &headers, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    match id.as_str() {
        "c-new" => Json(json!({
            "conversation_id": "c-new",
            "status": "active",
            "conversation_url": "https://tavus.daily.co/c-new"
        }))
        .into_response(),
        "c-old" => Json(json!({"conversation_id": "c-old", "status": "ended"})).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Conversation not found"}))).into_response(),
    }
}

async fn create_video(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.record("POST", "/v2/videos".to_string(), &headers, Some(body));
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    Json(json!({"video_id": "v-1", "status": "queued", "hosted_url": "https://videos/v-1"}))
        .into_response()
}

async fn list_videos(State(fake): State<FakeProvider>, headers: HeaderMap) -> Response {
    fake.record("GET", "/v2/videos".to_string(), &headers, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    let read = fake.video_list_calls.fetch_add(1, Ordering::SeqCst);
    let status = if read < fake.processing_reads.load(Ordering::SeqCst) {
        "processing"
    } else {
        "completed"
    };
    Json(json!([
        {"video_id": "v-1", "video_name": "Intro", "status": status},
        {"unexpected": "shape"}
    ]))
    .into_response()
}

async fn get_video(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    fake.record("GET", format!("/v2/videos/{}", id), &headers, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    match id.as_str() {
        "broken" => (
            StatusCode::BAD_GATEWAY,
            [("content-type", "text/html")],
            "<html>upstream down</html>",
        )
            .into_response(),
        _ => Json(json!({"video_id": id, "status": "completed", "download_url": "https://d/v"}))
            .into_response(),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Serves the fake provider and returns its base URL.
pub async fn spawn_provider(fake: FakeProvider) -> String {
    format!("http://{}", serve(fake.router()).await)
}

/// Serves the gateway in front of `upstream_base` and returns its base URL.
pub async fn spawn_gateway(upstream: UpstreamConfig) -> String {
    let client = TavusHttpClient::new(TavusClientConfig::from(&upstream)).unwrap();
    let handlers = GatewayHandlers::from_parts(Arc::new(client), upstream);
    let app = build_app(handlers, &ServerConfig::default());
    format!("http://{}", serve(app).await)
}

/// Upstream configuration with every credential set.
pub fn upstream(base_url: &str, api_key: &str) -> UpstreamConfig {
    UpstreamConfig::new(api_key, "persona-1", "replica-1")
        .with_base_url(base_url)
        .with_timeout_secs(5)
}
