//! Model responses with token accounting

use crate::bam::{GenerationResult, StopReason};
use super::message::AiMessage;

/// Token counts for a single generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    input_token_count: u32,
    output_token_count: u32,
    total_token_count: u32,
}

impl TokenUsage {
    /// Usage whose total is the sum of input and output counts
    pub fn new(input_token_count: u32, output_token_count: u32) -> Self {
        Self {
            input_token_count,
            output_token_count,
            total_token_count: input_token_count.saturating_add(output_token_count),
        }
    }

    pub fn input_token_count(&self) -> u32 {
        self.input_token_count
    }

    pub fn output_token_count(&self) -> u32 {
        self.output_token_count
    }

    pub fn total_token_count(&self) -> u32 {
        self.total_token_count
    }
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ToolExecution,
    ContentFilter,
    Other,
}

impl From<StopReason> for FinishReason {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::MaxTokens | StopReason::TokenLimit => Self::Length,
            StopReason::EosToken | StopReason::StopSequence => Self::Stop,
            StopReason::NotFinished
            | StopReason::Cancelled
            | StopReason::TimeLimit
            | StopReason::Error
            | StopReason::Unknown => Self::Other,
        }
    }
}

/// Model output with optional usage and finish reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    content: T,
    token_usage: Option<TokenUsage>,
    finish_reason: Option<FinishReason>,
}

impl<T> Response<T> {
    pub fn new(
        content: T,
        token_usage: Option<TokenUsage>,
        finish_reason: Option<FinishReason>,
    ) -> Self {
        Self {
            content,
            token_usage,
            finish_reason,
        }
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn token_usage(&self) -> Option<TokenUsage> {
        self.token_usage
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }
}

impl From<GenerationResult> for Response<AiMessage> {
    fn from(result: GenerationResult) -> Self {
        Response::new(
            AiMessage::new(result.generated_text),
            Some(TokenUsage::new(
                result.input_token_count,
                result.generated_token_count,
            )),
            Some(result.stop_reason.into()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_input_and_output() {
        let usage = TokenUsage::new(146, 20);
        assert_eq!(usage.input_token_count(), 146);
        assert_eq!(usage.output_token_count(), 20);
        assert_eq!(usage.total_token_count(), 166);
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(FinishReason::from(StopReason::MaxTokens), FinishReason::Length);
        assert_eq!(FinishReason::from(StopReason::TokenLimit), FinishReason::Length);
        assert_eq!(FinishReason::from(StopReason::EosToken), FinishReason::Stop);
        assert_eq!(FinishReason::from(StopReason::StopSequence), FinishReason::Stop);
        assert_eq!(FinishReason::from(StopReason::Cancelled), FinishReason::Other);
        assert_eq!(FinishReason::from(StopReason::Unknown), FinishReason::Other);
    }

    #[test]
    fn test_generation_result_maps_to_response() {
        let result = GenerationResult {
            generated_text: "AI Response".to_string(),
            generated_token_count: 20,
            input_token_count: 146,
            stop_reason: StopReason::MaxTokens,
            seed: Some(40268626),
        };

        let response = Response::from(result);
        assert_eq!(
            response,
            Response::new(
                AiMessage::new("AI Response"),
                Some(TokenUsage::new(146, 20)),
                Some(FinishReason::Length),
            )
        );
    }
}
