//! Gateway facade shared by the HTTP and tool surfaces

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::BoxStream;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use switchboard_config::Config;
use switchboard_core::{ErrorEnvelope, HttpError};

use crate::error::LlmError;
use crate::fallback::FallbackOrchestrator;
use crate::provider::anthropic::AnthropicProvider;
use crate::provider::openai::OpenAiProvider;
use crate::provider::{Provider, ProviderOutcome};
use crate::stream::pseudo_stream;
use crate::types::{CompletionRequest, CompletionResponse, DEFAULT_TEMPERATURE, Message, StreamEvent};

/// Prompt sent by [`Gateway::test_providers`]
const TEST_PROMPT: &str = "Say 'test'";

/// Token limit for provider connectivity tests
const TEST_MAX_TOKENS: u32 = 10;

/// Loosely-typed chat completion arguments from the tool surface
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatCompletionArgs {
    /// Conversation messages (`{"role": ..., "content": ...}` objects)
    pub messages: Vec<serde_json::Value>,
    /// Model name; defaults to the primary provider's model
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature between 0.0 and 2.0
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Streaming is only available over HTTP
    #[serde(default)]
    pub stream: bool,
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// Reply of [`Gateway::chat_completion`]
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatCompletionReply {
    /// Completed answer
    Completion(CompletionResponse),
    /// Request asked for something this surface does not do
    Notice(Notice),
    /// Validation or orchestration failure
    Error(ErrorEnvelope),
}

/// Informational reply with a machine-readable type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Notice kind
    #[serde(rename = "type")]
    pub notice_type: String,
    /// Human-readable explanation
    pub message: String,
}

impl Notice {
    fn streaming_not_supported() -> Self {
        Self {
            notice_type: "streaming_not_supported".to_owned(),
            message: "Streaming is supported via the SSE endpoint, not MCP tools".to_owned(),
        }
    }
}

/// Available models in provider priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelsReport {
    /// One entry per available provider
    pub available_models: Vec<ModelEntry>,
    /// First available provider
    pub primary_provider: Option<String>,
    /// Second available provider
    pub fallback_provider: Option<String>,
}

/// Model served by an available provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    /// Model identifier
    pub id: String,
    /// Provider identifier
    pub provider: String,
    /// Always `available`
    pub status: String,
}

/// Outcome of a provider connectivity test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Provider answered
    Ok,
    /// Provider was called and failed
    Failed,
    /// The test task itself aborted
    Error,
}

/// Connectivity test result for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderTestReport {
    /// Test outcome
    pub status: TestStatus,
    /// Model that was tested
    pub model: String,
    /// Failure reason or task error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Entry point for completions, streaming and provider introspection
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Clone)]
pub struct Gateway {
    orchestrator: Arc<FallbackOrchestrator>,
    cadence: Duration,
}

impl Gateway {
    /// Create a gateway over two providers
    pub fn new(primary: Arc<dyn Provider>, secondary: Arc<dyn Provider>, cadence: Duration) -> Self {
        Self {
            orchestrator: Arc::new(FallbackOrchestrator::new(primary, secondary)),
            cadence,
        }
    }

    /// Build the Anthropic primary and `OpenAI` secondary from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a provider's HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let primary = AnthropicProvider::new(&config.providers.primary)?;
        let secondary = OpenAiProvider::new(&config.providers.secondary)?;

        tracing::info!(
            primary = primary.is_available(),
            secondary = secondary.is_available(),
            "providers configured"
        );

        Ok(Self::new(Arc::new(primary), Arc::new(secondary), config.streaming.cadence()))
    }

    /// Model of the primary provider, used when a caller names none
    pub fn primary_model(&self) -> &str {
        self.orchestrator.providers()[0].model()
    }

    /// Validate and complete a request with fallback
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidRequest` for malformed requests and
    /// `LlmError::AllProvidersFailed` when no provider answered
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        request.validate()?;
        self.orchestrator.complete(request).await
    }

    /// Complete a request and replay it as a pseudo-stream
    ///
    /// Validation failures surface as the stream's single error event.
    pub fn stream(&self, request: CompletionRequest) -> BoxStream<'static, StreamEvent> {
        let gateway = self.clone();
        pseudo_stream(async move { gateway.complete(&request).await }, self.cadence)
    }

    /// Tool-surface chat completion; never fails outward
    pub async fn chat_completion(&self, args: ChatCompletionArgs) -> ChatCompletionReply {
        if args.stream {
            return ChatCompletionReply::Notice(Notice::streaming_not_supported());
        }

        let result = match self.coerce(args) {
            Ok(request) => self.complete(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => ChatCompletionReply::Completion(response),
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed");
                ChatCompletionReply::Error(ErrorEnvelope::gateway(e.client_message()))
            }
        }
    }

    fn coerce(&self, args: ChatCompletionArgs) -> Result<CompletionRequest, LlmError> {
        let messages = args
            .messages
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                serde_json::from_value::<Message>(value)
                    .map_err(|e| LlmError::InvalidRequest(format!("messages[{i}] is malformed: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let model = args
            .model
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| self.primary_model().to_owned());

        let request = CompletionRequest {
            model,
            messages,
            temperature: args.temperature,
            max_tokens: args.max_tokens,
            stream: Some(false),
        };

        request.validate()?;
        Ok(request)
    }

    /// Models of the available providers, in priority order
    pub fn list_models(&self) -> ModelsReport {
        let available: Vec<&Arc<dyn Provider>> = self
            .orchestrator
            .providers()
            .into_iter()
            .filter(|provider| provider.is_available())
            .collect();

        ModelsReport {
            available_models: available
                .iter()
                .map(|provider| ModelEntry {
                    id: provider.model().to_owned(),
                    provider: provider.name().to_owned(),
                    status: "available".to_owned(),
                })
                .collect(),
            primary_provider: available.first().map(|provider| provider.name().to_owned()),
            fallback_provider: available.get(1).map(|provider| provider.name().to_owned()),
        }
    }

    /// Send a tiny request to every available provider, concurrently
    ///
    /// Each test runs in its own task so one hung or panicking provider
    /// cannot affect the others' reports.
    pub async fn test_providers(&self) -> IndexMap<String, ProviderTestReport> {
        let tasks: Vec<_> = self
            .orchestrator
            .providers()
            .into_iter()
            .filter(|provider| provider.is_available())
            .map(|provider| {
                let provider = Arc::clone(provider);
                let name = provider.name().to_owned();
                let model = provider.model().to_owned();
                let request =
                    CompletionRequest::new(model.clone(), vec![Message::user(TEST_PROMPT)]).with_max_tokens(TEST_MAX_TOKENS);

                let handle = tokio::spawn(async move { provider.attempt(&request).await });
                (name, model, handle)
            })
            .collect();

        let mut reports = IndexMap::with_capacity(tasks.len());

        for (name, model, handle) in tasks {
            let report = match handle.await {
                Ok(ProviderOutcome::Success(_)) => ProviderTestReport {
                    status: TestStatus::Ok,
                    model,
                    detail: None,
                },
                Ok(ProviderOutcome::Failure(reason)) => ProviderTestReport {
                    status: TestStatus::Failed,
                    model,
                    detail: Some(reason),
                },
                Ok(ProviderOutcome::Unavailable) => ProviderTestReport {
                    status: TestStatus::Failed,
                    model,
                    detail: Some("provider unavailable".to_owned()),
                },
                Err(e) => {
                    tracing::error!(provider = %name, error = %e, "provider test task aborted");
                    ProviderTestReport {
                        status: TestStatus::Error,
                        model,
                        detail: Some(e.to_string()),
                    }
                }
            };

            reports.insert(name, report);
        }

        reports
    }
}
