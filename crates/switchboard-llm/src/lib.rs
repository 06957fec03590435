//! Chat completion gateway core
//!
//! Normalizes one OpenAI-shaped request into the Anthropic Messages and
//! `OpenAI` Chat Completions formats, tries the primary provider then the
//! secondary, and replays finished answers as pseudo-streams.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod fallback;
pub mod gateway;
#[cfg(feature = "http")]
pub mod handler;
pub mod protocol;
pub mod provider;
pub mod stream;
pub mod types;

pub use error::LlmError;
pub use fallback::FallbackOrchestrator;
pub use gateway::{ChatCompletionArgs, ChatCompletionReply, Gateway, ModelsReport, ProviderTestReport, TestStatus};
#[cfg(feature = "http")]
pub use handler::llm_router;
pub use provider::{Provider, ProviderOutcome};
pub use types::{CompletionRequest, CompletionResponse, StreamEvent};
