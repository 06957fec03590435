//! Pseudo-streaming over a completed response
//!
//! Upstream calls are never streamed. The finished answer is split into
//! word chunks and replayed as `chat.completion.chunk` events with a fixed
//! delay between them.

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use switchboard_core::{ErrorEnvelope, HttpError};

use crate::error::LlmError;
use crate::types::{ChunkChoice, ChunkDelta, CompletionChunk, CompletionResponse, StreamEvent};

/// Replay the result of `completion` as a stream of events
///
/// Nothing runs until the stream is first polled. `cadence` is awaited
/// between consecutive events; dropping the stream cancels whatever is left.
/// A failed completion yields a single [`StreamEvent::Error`] and no
/// [`StreamEvent::Done`].
pub fn pseudo_stream<F>(completion: F, cadence: Duration) -> BoxStream<'static, StreamEvent>
where
    F: Future<Output = Result<CompletionResponse, LlmError>> + Send + 'static,
{
    stream::once(completion)
        .flat_map(|result| stream::iter(events_for(result)))
        .enumerate()
        .then(move |(index, event)| async move {
            if index > 0 && !cadence.is_zero() {
                tokio::time::sleep(cadence).await;
            }
            event
        })
        .boxed()
}

fn events_for(result: Result<CompletionResponse, LlmError>) -> Vec<StreamEvent> {
    match result {
        Ok(response) => chunk_events(&response),
        Err(e) => {
            tracing::warn!(error = %e, "stream completion failed");
            vec![StreamEvent::Error(ErrorEnvelope::gateway(e.client_message()))]
        }
    }
}

/// Split a response into word chunks followed by [`StreamEvent::Done`]
///
/// Every word but the last carries a trailing space, so concatenating the
/// chunk contents yields the text with single-spaced words. Only the last
/// chunk has a finish reason.
pub fn chunk_events(response: &CompletionResponse) -> Vec<StreamEvent> {
    let words: Vec<&str> = response.first_content().split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    let mut events: Vec<StreamEvent> = if words.is_empty() {
        vec![StreamEvent::Chunk(chunk(response, String::new(), true))]
    } else {
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let content = if i < last { format!("{word} ") } else { (*word).to_owned() };
                StreamEvent::Chunk(chunk(response, content, i == last))
            })
            .collect()
    };

    events.push(StreamEvent::Done);
    events
}

fn chunk(response: &CompletionResponse, content: String, is_last: bool) -> CompletionChunk {
    CompletionChunk {
        id: response.id.clone(),
        object: "chat.completion.chunk".to_owned(),
        created: response.created,
        model: response.model.clone(),
        choices: vec![ChunkChoice {
            index: 0,
            delta: ChunkDelta { content },
            finish_reason: is_last.then(|| "stop".to_owned()),
        }],
    }
}
