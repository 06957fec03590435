use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `gateway_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Structured error body for this error
    fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.client_message(), self.error_type())
    }
}

/// JSON error body returned to callers: `{"error": {"message", "type"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorDetail,
}

/// Error details within an [`ErrorEnvelope`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,
    /// Machine-readable error type
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ErrorEnvelope {
    /// Build an envelope from a message and error type
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
            },
        }
    }

    /// Envelope with the `gateway_error` type used for all facade failures
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(message, "gateway_error")
    }
}
