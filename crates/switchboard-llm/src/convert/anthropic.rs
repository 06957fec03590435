//! Conversion between internal types and Anthropic wire format

use super::Conversation;
use crate::protocol::anthropic::{
    AnthropicContent, AnthropicContentBlock, AnthropicImageSource, AnthropicMessage, AnthropicRequest,
    AnthropicResponse, AnthropicResponseBlock,
};
use crate::types::{CompletionRequest, CompletionResponse, Content, ContentPart, ImageSource, Usage};

/// Default max tokens when not specified (Anthropic requires this field)
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Prefix applied to upstream message ids
const ID_PREFIX: &str = "anthropic-";

// -- Outbound: internal types -> Anthropic wire format --

/// Build a Messages API request for the given model
pub fn to_anthropic_request(request: &CompletionRequest, model: &str) -> AnthropicRequest {
    let conversation = Conversation::split(&request.messages);

    let system = conversation
        .system
        .and_then(Content::first_text)
        .map(ToOwned::to_owned);

    let messages = conversation
        .turns
        .into_iter()
        .map(|(role, content)| AnthropicMessage {
            role: role.as_str().to_owned(),
            content: content.into(),
        })
        .collect();

    AnthropicRequest {
        model: model.to_owned(),
        max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        system,
        messages,
        temperature: Some(request.temperature),
    }
}

impl From<&Content> for AnthropicContent {
    fn from(content: &Content) -> Self {
        match content {
            Content::Text(text) => Self::Text(text.clone()),
            Content::Parts(parts) if parts.is_empty() => Self::Text(String::new()),
            Content::Parts(parts) => Self::Blocks(parts.iter().map(Into::into).collect()),
        }
    }
}

impl From<&ContentPart> for AnthropicContentBlock {
    fn from(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Self::Text { text: text.clone() },
            ContentPart::ImageUrl { image_url } => Self::Image {
                source: ImageSource::parse(&image_url.url).into(),
            },
        }
    }
}

impl From<ImageSource> for AnthropicImageSource {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::Url(url) => Self::Url { url },
            ImageSource::Base64 { media_type, data } => Self::Base64 { media_type, data },
        }
    }
}

// -- Inbound: Anthropic wire format -> internal types --

/// Normalize a Messages API response
///
/// # Errors
///
/// Returns a failure reason when the response carries no text block
pub fn from_anthropic_response(response: AnthropicResponse) -> Result<CompletionResponse, String> {
    let text = response
        .content
        .into_iter()
        .find_map(|block| match block {
            AnthropicResponseBlock::Text { text } => Some(text),
            AnthropicResponseBlock::Other => None,
        })
        .ok_or_else(|| "response contained no text content".to_owned())?;

    let mut completion = CompletionResponse::assistant(format!("{ID_PREFIX}{}", response.id), response.model, text);
    completion.usage = response
        .usage
        .map(|usage| Usage::new(usage.input_tokens, usage.output_tokens));

    Ok(completion)
}
