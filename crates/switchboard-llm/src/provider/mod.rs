//! Provider trait and the two upstream adapters

pub mod anthropic;
pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Result of a single provider attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Provider produced a completion
    Success(CompletionResponse),
    /// Provider is not configured; no call was made
    Unavailable,
    /// Provider was called and failed
    Failure(String),
}

impl ProviderOutcome {
    /// Fold an adapter call result into an outcome, logging failures
    pub fn from_result(provider: &str, result: Result<CompletionResponse, LlmError>) -> Self {
        match result {
            Ok(response) => Self::Success(response),
            Err(LlmError::ProviderUnavailable { .. }) => {
                tracing::debug!(provider, "provider unavailable, skipping");
                Self::Unavailable
            }
            Err(e) => {
                tracing::warn!(provider, error = %e, "provider call failed");
                Self::Failure(e.to_string())
            }
        }
    }
}

/// Trait implemented by each upstream backend
///
/// `attempt` never returns an error: every failure is folded into a
/// [`ProviderOutcome`] so the orchestrator can decide what happens next.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier (`anthropic`, `openai`)
    fn name(&self) -> &str;

    /// Configured model for this provider
    fn model(&self) -> &str;

    /// Whether the provider is configured to take requests
    fn is_available(&self) -> bool;

    /// Make one completion attempt, with no retries
    async fn attempt(&self, request: &CompletionRequest) -> ProviderOutcome;
}

/// Join a configured base URL with an endpoint path
pub(crate) fn endpoint(base_url: &url::Url, path: &str) -> String {
    let base = base_url.as_str().trim_end_matches('/');
    format!("{base}/{path}")
}

/// Build an HTTP client with a whole-request timeout
pub(crate) fn http_client(timeout_seconds: u64) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| LlmError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))
}

/// Parse a built-in default base URL
pub(crate) fn default_base_url(url: &str) -> Result<url::Url, LlmError> {
    url::Url::parse(url).map_err(|e| LlmError::Internal(anyhow::anyhow!("invalid default base URL: {e}")))
}
