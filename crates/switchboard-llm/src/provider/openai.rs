//! `OpenAI` Chat Completions adapter (secondary provider)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use switchboard_config::SecondaryProviderConfig;
use url::Url;

use super::{Provider, ProviderOutcome};
use crate::convert::openai::to_openai_request;
use crate::error::LlmError;
use crate::protocol::openai::OpenAiResponse;
use crate::types::{CompletionRequest, CompletionResponse};

/// Provider identifier
pub const PROVIDER_NAME: &str = "openai";

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` chat completions provider
///
/// Always requests the configured model, whatever the caller asked for.
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
    model: String,
    api_key: Option<SecretString>,
}

impl OpenAiProvider {
    /// Create from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Internal` if the HTTP client cannot be built
    pub fn new(config: &SecondaryProviderConfig) -> Result<Self, LlmError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => super::default_base_url(DEFAULT_BASE_URL)?,
        };

        Ok(Self {
            client: super::http_client(config.timeout_seconds)?,
            base_url,
            model: config.model.clone(),
            api_key: config.configured_api_key().cloned(),
        })
    }

    async fn call(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let Some(api_key) = &self.api_key else {
            return Err(LlmError::ProviderUnavailable {
                provider: PROVIDER_NAME.to_owned(),
            });
        };

        let wire_request = to_openai_request(request, &self.model);

        let response = self
            .client
            .post(super::endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| LlmError::call_failed(PROVIDER_NAME, e.to_string()))?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::call_failed(
                PROVIDER_NAME,
                format!("provider returned {status}: {body}"),
            ));
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::call_failed(PROVIDER_NAME, format!("failed to parse response: {e}")))?;

        Ok(wire_response.into())
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn attempt(&self, request: &CompletionRequest) -> ProviderOutcome {
        ProviderOutcome::from_result(PROVIDER_NAME, self.call(request).await)
    }
}
