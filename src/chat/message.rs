//! Conversation messages

use crate::bam::{Message, ROLE_ASSISTANT, ROLE_SYSTEM, ROLE_USER};

/// Text produced by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMessage {
    text: String,
}

impl AiMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System(String),
    User(String),
    Ai(AiMessage),
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::System(text.into())
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::User(text.into())
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::Ai(AiMessage::new(text))
    }

    /// Wire role label for this message
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => ROLE_SYSTEM,
            Self::User(_) => ROLE_USER,
            Self::Ai(_) => ROLE_ASSISTANT,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::System(text) | Self::User(text) => text,
            Self::Ai(message) => message.text(),
        }
    }
}

impl From<AiMessage> for ChatMessage {
    fn from(message: AiMessage) -> Self {
        Self::Ai(message)
    }
}

impl From<&ChatMessage> for Message {
    fn from(message: &ChatMessage) -> Self {
        Message::new(message.role(), message.text())
    }
}
