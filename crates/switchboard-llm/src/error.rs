use http::StatusCode;
use switchboard_core::HttpError;
use thiserror::Error;

/// Message returned when no provider produced a completion
pub const ALL_PROVIDERS_FAILED_MESSAGE: &str = "All providers failed. Check configuration and API keys.";

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider is disabled or lacks credentials; skipped without a call
    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    /// Provider was called and did not produce a usable completion
    #[error("{provider} call failed: {reason}")]
    ProviderCallFailed { provider: String, reason: String },

    /// Every provider was unavailable or failed
    #[error("All providers failed. Check configuration and API keys.")]
    AllProvidersFailed,

    /// Client sent a malformed or invalid request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LlmError {
    /// Call failure for the named provider
    pub fn call_failed(provider: &str, reason: impl Into<String>) -> Self {
        Self::ProviderCallFailed {
            provider: provider.to_owned(),
            reason: reason.into(),
        }
    }
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderCallFailed { .. } | Self::AllProvidersFailed => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::ProviderCallFailed { .. } => "upstream_error",
            Self::AllProvidersFailed => "gateway_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}
