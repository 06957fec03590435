//! Conversion between internal canonical types and upstream wire formats
//!
//! Both normalizers share one system-message policy: the first system
//! message becomes the system prompt and any later system message is
//! demoted to an ordinary user turn.

pub mod anthropic;
pub mod openai;

use crate::types::{Content, Message, Role};

/// Conversation split into its system prompt and remaining turns
#[derive(Debug)]
pub(crate) struct Conversation<'a> {
    /// Content of the first system message
    pub system: Option<&'a Content>,
    /// Every other message, in order, with its effective role
    pub turns: Vec<(Role, &'a Content)>,
}

impl<'a> Conversation<'a> {
    pub(crate) fn split(messages: &'a [Message]) -> Self {
        let mut system = None;
        let mut turns = Vec::with_capacity(messages.len());

        for message in messages {
            match message.role {
                Role::System if system.is_none() => system = Some(&message.content),
                Role::System => turns.push((Role::User, &message.content)),
                role => turns.push((role, &message.content)),
            }
        }

        Self { system, turns }
    }
}
