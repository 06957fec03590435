//! Primary-then-secondary provider fallback

use std::sync::Arc;

use crate::error::LlmError;
use crate::provider::{Provider, ProviderOutcome};
use crate::types::{CompletionRequest, CompletionResponse};

/// Tries the primary provider, then the secondary, in that fixed order
///
/// The first success wins. The secondary is only invoked when the primary
/// was unavailable or failed.
#[derive(Clone)]
pub struct FallbackOrchestrator {
    primary: Arc<dyn Provider>,
    secondary: Arc<dyn Provider>,
}

impl FallbackOrchestrator {
    /// Create an orchestrator over two providers
    pub fn new(primary: Arc<dyn Provider>, secondary: Arc<dyn Provider>) -> Self {
        Self { primary, secondary }
    }

    /// Providers in priority order
    pub fn providers(&self) -> [&Arc<dyn Provider>; 2] {
        [&self.primary, &self.secondary]
    }

    /// Run the request against the providers until one succeeds
    ///
    /// # Errors
    ///
    /// Returns `LlmError::AllProvidersFailed` when neither provider produced
    /// a completion
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        for provider in self.providers() {
            match provider.attempt(request).await {
                ProviderOutcome::Success(response) => {
                    tracing::debug!(provider = %provider.name(), "completion served");
                    return Ok(response);
                }
                ProviderOutcome::Unavailable => {
                    tracing::debug!(provider = %provider.name(), "provider not configured, falling through");
                }
                ProviderOutcome::Failure(reason) => {
                    tracing::warn!(provider = %provider.name(), reason = %reason, "provider failed, falling through");
                }
            }
        }

        tracing::error!("all providers failed");
        Err(LlmError::AllProvidersFailed)
    }
}
