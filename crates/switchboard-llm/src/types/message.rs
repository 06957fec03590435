use serde::{Deserialize, Serialize};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Message content
    pub content: Content,
}

impl Message {
    /// Plain text message with the given role
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(text.into()),
        }
    }

    /// Plain text user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }
}

/// Message content, either plain text or structured parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text content
    Text(String),
    /// Array of content parts (text and images)
    Parts(Vec<ContentPart>),
}

impl Content {
    /// Extract text content, joining text parts and skipping images
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// First text found in the content, if any
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parts(parts) => parts.iter().find_map(ContentPart::as_text),
        }
    }
}

/// Individual part within a multipart message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content block
    Text {
        /// The text string
        text: String,
    },
    /// Image reference
    ImageUrl {
        /// Image location
        image_url: ImageUrl,
    },
}

impl ContentPart {
    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }
}

/// Image location within a content part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Remote URL or `data:` URI
    pub url: String,
    /// Detail level hint (e.g. "auto", "low", "high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Where an image's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image, passed through unmodified
    Url(String),
    /// Inline base64 payload from a `data:` URI
    Base64 {
        /// Media type, e.g. `image/png`
        media_type: String,
        /// Base64 payload
        data: String,
    },
}

impl ImageSource {
    /// Interpret an image URL
    ///
    /// `data:<media_type>;base64,<payload>` yields [`ImageSource::Base64`] with
    /// the media type taken up to the first `;` and the payload after the
    /// first `,`. Anything else is a plain URL.
    pub fn parse(url: &str) -> Self {
        let Some(rest) = url.strip_prefix("data:") else {
            return Self::Url(url.to_owned());
        };

        match (rest.split_once(';'), rest.split_once(',')) {
            (Some((media_type, _)), Some((_, data))) if !media_type.contains(',') => Self::Base64 {
                media_type: media_type.to_owned(),
                data: data.to_owned(),
            },
            _ => Self::Url(url.to_owned()),
        }
    }
}
