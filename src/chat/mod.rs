//! Chat model abstraction
//!
//! [`ChatLanguageModel`] is the seam between callers (including
//! [`crate::service::AiService`]) and a concrete backend. [`BamChatModel`]
//! is the BAM implementation.

pub mod bam;
pub mod message;
pub mod response;
pub mod tool;

pub use bam::BamChatModel;
pub use message::{AiMessage, ChatMessage};
pub use response::{FinishReason, Response, TokenUsage};
pub use tool::{Tool, ToolParameters, ToolSpecification};

use crate::error::{AppError, AppResult};
use async_trait::async_trait;

/// A model that turns a conversation into an assistant reply
#[async_trait]
pub trait ChatLanguageModel: Send + Sync {
    /// Generate a reply for the ordered conversation
    async fn generate(&self, messages: &[ChatMessage]) -> AppResult<Response<AiMessage>>;

    /// Generate a reply, allowing the model to call the given tools
    ///
    /// Models without function calling reject every call, whatever the
    /// specifications contain.
    async fn generate_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tool_specifications: &[ToolSpecification],
    ) -> AppResult<Response<AiMessage>> {
        Err(AppError::tools_not_supported())
    }

    /// Single-tool form of [`generate_with_tools`](Self::generate_with_tools)
    async fn generate_with_tool(
        &self,
        messages: &[ChatMessage],
        tool_specification: &ToolSpecification,
    ) -> AppResult<Response<AiMessage>> {
        self.generate_with_tools(messages, std::slice::from_ref(tool_specification))
            .await
    }

    /// Send one user message and return the assistant text
    async fn generate_text(&self, user_message: &str) -> AppResult<String> {
        let response = self.generate(&[ChatMessage::user(user_message)]).await?;
        Ok(response.into_content().into_text())
    }
}
