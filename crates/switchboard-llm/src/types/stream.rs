use serde::{Deserialize, Serialize};
use switchboard_core::ErrorEnvelope;

/// Terminal payload of an event stream
pub const DONE_MARKER: &str = "[DONE]";

/// Event emitted by the pseudo-stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Incremental content chunk
    Chunk(CompletionChunk),
    /// Orchestration failed; the stream ends after this event
    Error(ErrorEnvelope),
    /// Stream has completed
    Done,
}

impl StreamEvent {
    /// Payload for a `data:` line of a server-sent event
    pub fn to_sse_data(&self) -> String {
        match self {
            Self::Chunk(chunk) => serde_json::to_string(chunk).unwrap_or_default(),
            Self::Error(envelope) => serde_json::to_string(envelope).unwrap_or_default(),
            Self::Done => DONE_MARKER.to_owned(),
        }
    }
}

/// Streaming chunk in `OpenAI` `chat.completion.chunk` shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChunk {
    /// Identifier shared by every chunk of one stream
    pub id: String,
    /// Object type, `chat.completion.chunk`
    pub object: String,
    /// Unix timestamp of the underlying completion
    pub created: u64,
    /// Model that produced the completion
    pub model: String,
    /// Chunk choices (always one)
    pub choices: Vec<ChunkChoice>,
}

impl CompletionChunk {
    /// Text carried by this chunk
    pub fn content(&self) -> &str {
        self.choices.first().map_or("", |choice| choice.delta.content.as_str())
    }

    /// Finish reason carried by this chunk
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|choice| choice.finish_reason.as_deref())
    }
}

/// A single choice within a streaming chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Index of this choice
    pub index: u32,
    /// Incremental content
    pub delta: ChunkDelta,
    /// `stop` on the final chunk, `null` otherwise
    pub finish_reason: Option<String>,
}

/// Incremental content within a chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
    /// Text fragment
    pub content: String,
}
