//! Declarative chat services
//!
//! An [`AiService`] pairs a chat model with a fixed system message and a
//! user message template. Templates use `{name}` placeholders; write `{{`
//! and `}}` for literal braces.
//!
//! ```no_run
//! # async fn demo(model: std::sync::Arc<dyn bam_chat::chat::ChatLanguageModel>) -> bam_chat::error::AppResult<()> {
//! let service = bam_chat::service::AiService::builder(model)
//!     .system_message("This is a systemMessage")
//!     .user_message("This is a userMessage {text}")
//!     .build();
//! let answer = service.chat("Hello").await?;
//! # Ok(())
//! # }
//! ```

use crate::chat::{ChatLanguageModel, ChatMessage};
use crate::error::{AppError, AppResult};
use std::sync::Arc;

/// Placeholder filled by [`AiService::chat`]
pub const TEXT_VARIABLE: &str = "text";

/// Chat service with templated system and user messages
pub struct AiService {
    model: Arc<dyn ChatLanguageModel>,
    system_template: Option<String>,
    user_template: String,
}

impl AiService {
    pub fn builder(model: Arc<dyn ChatLanguageModel>) -> AiServiceBuilder {
        AiServiceBuilder {
            model,
            system_template: None,
            user_template: format!("{{{}}}", TEXT_VARIABLE),
        }
    }

    /// Render the templates with `text` and return the assistant reply
    pub async fn chat(&self, text: &str) -> AppResult<String> {
        self.chat_with(&[(TEXT_VARIABLE, text)]).await
    }

    /// Render the templates with named variables and return the assistant reply
    pub async fn chat_with(&self, variables: &[(&str, &str)]) -> AppResult<String> {
        let messages = self.messages(variables)?;
        let response = self.model.generate(&messages).await?;
        Ok(response.into_content().into_text())
    }

    /// Conversation sent for the given variables
    pub fn messages(&self, variables: &[(&str, &str)]) -> AppResult<Vec<ChatMessage>> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_template {
            messages.push(ChatMessage::system(render(system, variables)?));
        }
        messages.push(ChatMessage::user(render(&self.user_template, variables)?));
        Ok(messages)
    }
}

pub struct AiServiceBuilder {
    model: Arc<dyn ChatLanguageModel>,
    system_template: Option<String>,
    user_template: String,
}

impl AiServiceBuilder {
    pub fn system_message(mut self, template: impl Into<String>) -> Self {
        self.system_template = Some(template.into());
        self
    }

    pub fn user_message(mut self, template: impl Into<String>) -> Self {
        self.user_template = template.into();
        self
    }

    pub fn build(self) -> AiService {
        AiService {
            model: self.model,
            system_template: self.system_template,
            user_template: self.user_template,
        }
    }
}

/// Substitute `{name}` placeholders in `template`
pub fn render(template: &str, variables: &[(&str, &str)]) -> AppResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(AppError::Template(format!(
                                "unclosed placeholder '{{{}' in template",
                                name
                            )));
                        }
                    }
                }
                let name = name.trim();
                let value = variables
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        AppError::Template(format!("no value for placeholder '{{{}}}'", name))
                    })?;
                out.push_str(value);
            }
            '}' => {
                return Err(AppError::Template(
                    "unmatched '}' in template (use '}}' for a literal brace)".to_string(),
                ));
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
