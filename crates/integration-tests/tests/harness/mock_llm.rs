//! Mock upstream servers for integration tests
//!
//! Implements just enough of the Anthropic Messages and `OpenAI` Chat
//! Completions APIs to return canned answers, count calls and capture the
//! last request body.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// API surface served by a mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// `POST /v1/messages`
    Anthropic,
    /// `POST /v1/chat/completions`
    OpenAi,
}

/// Mock upstream that returns predictable responses
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    flavor: Flavor,
    completion_count: AtomicU32,
    /// Number of requests to fail before succeeding
    fail_count: AtomicU32,
    /// Status returned for failing requests
    fail_status: StatusCode,
    response_content: String,
    last_request: Mutex<Option<serde_json::Value>>,
}

impl MockLlm {
    /// Start a mock answering "Hello from mock LLM"
    pub async fn start(flavor: Flavor) -> anyhow::Result<Self> {
        Self::start_inner(flavor, 0, StatusCode::INTERNAL_SERVER_ERROR, "Hello from mock LLM").await
    }

    /// Start a mock answering with `content`
    pub async fn start_with_response(flavor: Flavor, content: &str) -> anyhow::Result<Self> {
        Self::start_inner(flavor, 0, StatusCode::INTERNAL_SERVER_ERROR, content).await
    }

    /// Start a mock that fails the first `n` requests with 500
    pub async fn start_failing(flavor: Flavor, n: u32) -> anyhow::Result<Self> {
        Self::start_inner(flavor, n, StatusCode::INTERNAL_SERVER_ERROR, "Hello from mock LLM").await
    }

    /// Start a mock that answers every request with `status` and a JSON body
    pub async fn start_with_status(flavor: Flavor, status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(flavor, u32::MAX, status, "Hello from mock LLM").await
    }

    async fn start_inner(
        flavor: Flavor,
        fail_count: u32,
        fail_status: StatusCode,
        content: &str,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            flavor,
            completion_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            fail_status,
            response_content: content.to_owned(),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/messages", routing::post(handle_messages))
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since the adapters append `/messages` or `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent request
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Record the call and decide whether it should fail
fn record(state: &MockLlmState, flavor: Flavor, body: serde_json::Value) -> Option<Response> {
    if state.flavor != flavor {
        return Some(StatusCode::NOT_FOUND.into_response());
    }

    state.completion_count.fetch_add(1, Ordering::Relaxed);
    *state.last_request.lock().unwrap() = Some(body);

    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        if remaining != u32::MAX {
            state.fail_count.fetch_sub(1, Ordering::Relaxed);
        }
        return Some(
            (
                state.fail_status,
                Json(serde_json::json!({
                    "error": {
                        "message": "mock server intentional failure",
                        "type": "server_error"
                    }
                })),
            )
                .into_response(),
        );
    }

    None
}

// -- Handlers --

async fn handle_messages(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(response) = record(&state, Flavor::Anthropic, body.clone()) {
        return response;
    }

    if headers.get("x-api-key").is_none() || headers.get("anthropic-version").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"type": "error", "error": {"type": "authentication_error"}})),
        )
            .into_response();
    }

    Json(serde_json::json!({
        "id": "msg_mock",
        "type": "message",
        "role": "assistant",
        "model": body["model"],
        "content": [{"type": "text", "text": state.response_content}],
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 10, "output_tokens": 5}
    }))
    .into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(response) = record(&state, Flavor::OpenAi, body.clone()) {
        return response;
    }

    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer "));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.response_content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .into_response()
}
