//! Internal canonical types for chat completion requests and responses
//!
//! The unified shape follows the `OpenAI` chat completion format. Provider
//! wire formats convert to and from these types in [`crate::convert`].

pub mod message;
pub mod request;
pub mod response;
pub mod stream;

pub use message::{Content, ContentPart, ImageSource, ImageUrl, Message, Role};
pub use request::{CompletionRequest, DEFAULT_TEMPERATURE};
pub use response::{Choice, ChoiceMessage, CompletionResponse, Usage};
pub use stream::{ChunkChoice, ChunkDelta, CompletionChunk, DONE_MARKER, StreamEvent};
