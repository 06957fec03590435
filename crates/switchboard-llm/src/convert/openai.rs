//! Conversion between internal types and `OpenAI` wire format

use super::Conversation;
use crate::protocol::openai::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use crate::types::{Choice, ChoiceMessage, CompletionRequest, CompletionResponse, Content, Role, Usage};

/// Build a chat completions request for the given model
pub fn to_openai_request(request: &CompletionRequest, model: &str) -> OpenAiRequest {
    let conversation = Conversation::split(&request.messages);

    let system = conversation.system.map(|content| (Role::System, content));
    let messages = system
        .into_iter()
        .chain(conversation.turns)
        .map(|(role, content)| OpenAiMessage {
            role: role.as_str().to_owned(),
            content: normalize_content(content),
        })
        .collect();

    OpenAiRequest {
        model: model.to_owned(),
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

fn normalize_content(content: &Content) -> Content {
    match content {
        Content::Parts(parts) if parts.is_empty() => Content::Text(String::new()),
        other => other.clone(),
    }
}

impl From<OpenAiResponse> for CompletionResponse {
    fn from(response: OpenAiResponse) -> Self {
        Self {
            id: response.id,
            object: response.object,
            created: response.created,
            model: response.model,
            choices: response
                .choices
                .into_iter()
                .map(|choice| Choice {
                    index: choice.index,
                    message: ChoiceMessage {
                        role: choice.message.role,
                        content: choice.message.content,
                    },
                    finish_reason: choice.finish_reason,
                })
                .collect(),
            usage: response.usage.map(|usage| Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        }
    }
}
