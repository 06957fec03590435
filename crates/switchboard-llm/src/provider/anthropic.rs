//! Anthropic Messages API adapter (primary provider)

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use switchboard_config::PrimaryProviderConfig;
use url::Url;

use super::{Provider, ProviderOutcome};
use crate::convert::anthropic::{from_anthropic_response, to_anthropic_request};
use crate::error::LlmError;
use crate::protocol::anthropic::AnthropicResponse;
use crate::types::{CompletionRequest, CompletionResponse};

/// Provider identifier
pub const PROVIDER_NAME: &str = "anthropic";

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    base_url: Url,
    model: String,
    api_key: Option<SecretString>,
    enabled: bool,
}

impl AnthropicProvider {
    /// Create from provider configuration
    ///
    /// Availability is decided here, once: the provider takes requests only
    /// if it is enabled and holds a non-empty API key.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Internal` if the HTTP client cannot be built
    pub fn new(config: &PrimaryProviderConfig) -> Result<Self, LlmError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => super::default_base_url(DEFAULT_BASE_URL)?,
        };

        Ok(Self {
            client: super::http_client(config.timeout_seconds)?,
            base_url,
            model: config.model.clone(),
            api_key: config.configured_api_key().cloned(),
            enabled: config.enabled,
        })
    }

    /// Model to request: the caller's choice, else the configured one
    fn resolve_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        if request.model.trim().is_empty() {
            &self.model
        } else {
            &request.model
        }
    }

    async fn call(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let Some(api_key) = self.api_key.as_ref().filter(|_| self.enabled) else {
            return Err(LlmError::ProviderUnavailable {
                provider: PROVIDER_NAME.to_owned(),
            });
        };

        let wire_request = to_anthropic_request(request, self.resolve_model(request));

        let response = self
            .client
            .post(super::endpoint(&self.base_url, "messages"))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| LlmError::call_failed(PROVIDER_NAME, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::call_failed(
                PROVIDER_NAME,
                format!("provider returned {status}: {body}"),
            ));
        }

        let wire_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::call_failed(PROVIDER_NAME, format!("failed to parse response: {e}")))?;

        from_anthropic_response(wire_response).map_err(|reason| LlmError::call_failed(PROVIDER_NAME, reason))
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    async fn attempt(&self, request: &CompletionRequest) -> ProviderOutcome {
        ProviderOutcome::from_result(PROVIDER_NAME, self.call(request).await)
    }
}
