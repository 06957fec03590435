//! `OpenAI` Chat Completions API wire format types

use serde::{Deserialize, Serialize};

use crate::types::Content;

// -- Request types --

/// `OpenAI` chat completions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// `OpenAI` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Role ("system", "user" or "assistant")
    pub role: String,
    /// Text or `OpenAI` content-part array
    pub content: Content,
}

// -- Response types --

/// `OpenAI` chat completions response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    /// Response identifier
    pub id: String,
    /// Object type
    #[serde(default = "default_object")]
    pub object: String,
    /// Unix timestamp
    #[serde(default)]
    pub created: u64,
    /// Model used
    pub model: String,
    /// Completion choices
    pub choices: Vec<OpenAiChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

fn default_object() -> String {
    "chat.completion".to_owned()
}

/// Choice within an `OpenAI` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: OpenAiResponseMessage,
    /// Finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within an `OpenAI` response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Role, normally "assistant"
    pub role: String,
    /// Text content; null for tool-call-only answers
    #[serde(default)]
    pub content: Option<String>,
}

/// `OpenAI` token usage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpenAiUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}
