//! Axum route handlers for the OpenAI-compatible HTTP surface

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::{Stream, StreamExt};
use switchboard_core::HttpError;

use crate::error::LlmError;
use crate::gateway::Gateway;
use crate::types::{CompletionRequest, CompletionResponse, Content};

/// Echo used when a test request has no readable message
const NO_MESSAGE: &str = "No message";

/// Build the LLM router with all endpoints
pub fn llm_router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/v1/chat/completions", routing::post(chat_completions))
        .route("/v1/chat/completions/test", routing::post(chat_completions_test))
        .route("/v1/models", routing::get(list_models))
        .with_state(gateway)
}

/// Handle `POST /v1/chat/completions`
///
/// Answers with a `text/event-stream` pseudo-stream when `stream` is true or
/// absent. An explicit `"stream": false` returns a plain JSON completion
/// instead, or an error envelope with 400 for invalid requests and 502 when
/// every provider failed.
async fn chat_completions(
    State(gateway): State<Arc<Gateway>>,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(&LlmError::InvalidRequest(rejection.body_text())),
    };

    if request.wants_stream() {
        return sse_response(gateway.stream(request)).into_response();
    }

    match gateway.complete(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `POST /v1/chat/completions/test`
///
/// Echoes the last message without calling any provider.
async fn chat_completions_test(Json(body): Json<serde_json::Value>) -> Response {
    let text = body
        .get("messages")
        .and_then(serde_json::Value::as_array)
        .and_then(|messages| messages.last())
        .and_then(|message| message.get("content"))
        .and_then(|content| serde_json::from_value::<Content>(content.clone()).ok())
        .map_or_else(|| NO_MESSAGE.to_owned(), |content| content.as_text());

    Json(CompletionResponse::assistant("test-123", "test", format!("Echo: {text}"))).into_response()
}

/// Handle `GET /v1/models`
async fn list_models(State(gateway): State<Arc<Gateway>>) -> Response {
    Json(gateway.list_models()).into_response()
}

/// Wrap pseudo-stream events as `data:` frames
fn sse_response(
    events: impl Stream<Item = crate::types::StreamEvent> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let frames = events.map(|event| Ok(Event::default().data(event.to_sse_data())));
    Sse::new(frames).keep_alive(KeepAlive::default())
}

/// Convert an LLM error to a JSON error response
fn error_response(error: &LlmError) -> Response {
    (error.status_code(), Json(error.envelope())).into_response()
}
