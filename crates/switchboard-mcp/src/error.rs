use thiserror::Error;

/// Tool server errors
#[derive(Debug, Error)]
pub enum McpError {
    /// Transport-level connection or communication error
    #[error("transport error: {0}")]
    Transport(String),

    /// Tool reply could not be encoded
    #[error("failed to encode tool reply: {0}")]
    Serialization(#[from] serde_json::Error),
}
