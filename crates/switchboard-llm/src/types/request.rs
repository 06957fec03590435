use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::error::LlmError;

/// Sampling temperature used when a request omits one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Internal canonical completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier; empty selects the provider's configured model
    #[serde(default)]
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response; absent means streaming on HTTP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl CompletionRequest {
    /// Non-streaming request with default sampling parameters
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            stream: None,
        }
    }

    /// Set the token limit
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Whether the HTTP surface should answer with an event stream
    pub fn wants_stream(&self) -> bool {
        self.stream.unwrap_or(true)
    }

    /// Check the request before it reaches a provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidRequest` when there are no messages, the
    /// temperature is out of range, or `max_tokens` is zero
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.messages.is_empty() {
            return Err(LlmError::InvalidRequest("messages must not be empty".to_owned()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == Some(0) {
            return Err(LlmError::InvalidRequest("max_tokens must be greater than 0".to_owned()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let request: CompletionRequest =
            serde_json::from_value(serde_json::json!({"messages": [{"role": "user", "content": "hi"}]})).unwrap();

        assert_eq!(request.model, "");
        assert!((request.temperature - DEFAULT_TEMPERATURE).abs() < f64::EPSILON);
        assert_eq!(request.max_tokens, None);
        assert!(request.wants_stream());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn explicit_false_disables_streaming() {
        let request: CompletionRequest = serde_json::from_value(serde_json::json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hi"}],
            "stream": false
        }))
        .unwrap();

        assert!(!request.wants_stream());
    }

    #[test]
    fn empty_messages_are_rejected() {
        let err = CompletionRequest::new("m", Vec::new()).validate().unwrap_err();
        assert!(err.to_string().contains("messages must not be empty"));
    }

    #[test]
    fn system_only_conversation_is_accepted() {
        let request = CompletionRequest::new("m", vec![Message::text(Role::System, "Say hi")]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let mut request = CompletionRequest::new("m", vec![Message::user("hi")]);
        request.temperature = 2.5;

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let request = CompletionRequest::new("m", vec![Message::user("hi")]).with_max_tokens(0);
        assert!(matches!(request.validate(), Err(LlmError::InvalidRequest(_))));
    }
}
