use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Health check response body
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    port: u16,
}

impl HealthStatus {
    pub const fn ok(port: u16) -> Self {
        Self { status: "ok", port }
    }
}

/// Health check handler
pub async fn health_handler(State(status): State<HealthStatus>) -> Json<HealthStatus> {
    Json(status)
}
