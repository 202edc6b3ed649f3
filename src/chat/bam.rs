//! BAM-backed chat model

use super::{AiMessage, ChatLanguageModel, ChatMessage, Response, ToolSpecification};
use crate::bam::{BamClient, Message, Parameters, TextGenerationRequest};
use crate::config::BamConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::{Metrics, Outcome, TokenKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Chat model that sends every conversation to the BAM chat endpoint
///
/// Holds no mutable state; share it behind `Arc` across tasks.
pub struct BamChatModel {
    client: BamClient,
    model_id: String,
    parameters: Parameters,
    metrics: Option<Arc<Metrics>>,
}

impl BamChatModel {
    /// Build a model from one BAM configuration, copying its chat defaults
    ///
    /// The configuration is validated first, so a directly deserialized
    /// `BamConfig` gets the same range checks as one loaded from a file.
    pub fn from_config(config: &BamConfig) -> AppResult<Self> {
        config.validate()?;
        let chat = config.chat_model();
        Ok(Self {
            client: BamClient::new(config)?,
            model_id: chat.model_id().to_string(),
            parameters: chat.parameters(),
            metrics: None,
        })
    }

    /// Record request metrics into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Wire request for `messages`, in order
    pub fn build_request(&self, messages: &[ChatMessage]) -> TextGenerationRequest {
        TextGenerationRequest::new(
            self.model_id.clone(),
            messages.iter().map(Message::from).collect(),
            self.parameters.clone(),
        )
    }

    fn record(&self, outcome: Outcome, started: Option<Instant>) {
        let Some(metrics) = &self.metrics else {
            return;
        };

        if let Err(e) = metrics.record_request(outcome) {
            tracing::warn!(error = %e, outcome = outcome.as_str(), "Failed to record request metric");
        }
        if let Some(started) = started {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            if let Err(e) = metrics.record_duration(outcome, elapsed_ms) {
                tracing::warn!(error = %e, "Failed to record request duration");
            }
        }
    }

    fn record_usage(&self, response: &Response<AiMessage>) {
        let (Some(metrics), Some(usage)) = (&self.metrics, response.token_usage()) else {
            return;
        };

        for (kind, count) in [
            (TokenKind::Input, usage.input_token_count()),
            (TokenKind::Output, usage.output_token_count()),
        ] {
            if let Err(e) = metrics.record_tokens(kind, count) {
                tracing::warn!(error = %e, kind = kind.as_str(), "Failed to record token metric");
            }
        }
    }
}

fn outcome_for(error: &AppError) -> Outcome {
    match error {
        AppError::Api { .. } => Outcome::ApiError,
        AppError::Http { .. } => Outcome::TransportError,
        AppError::UnsupportedFeature(_) => Outcome::Rejected,
        _ => Outcome::ParseError,
    }
}

#[async_trait]
impl ChatLanguageModel for BamChatModel {
    async fn generate(&self, messages: &[ChatMessage]) -> AppResult<Response<AiMessage>> {
        let request = self.build_request(messages);
        let started = Instant::now();

        tracing::debug!(
            model_id = %self.model_id,
            messages = messages.len(),
            "Sending chat request"
        );

        let result = match self.client.chat(&request).await {
            Ok(body) => body
                .results
                .into_iter()
                .next()
                .map(Response::from)
                .ok_or(AppError::EmptyResults),
            Err(e) => Err(e),
        };

        match &result {
            Ok(response) => {
                self.record(Outcome::Success, Some(started));
                self.record_usage(response);
                tracing::debug!(
                    model_id = %self.model_id,
                    finish_reason = ?response.finish_reason(),
                    total_tokens = response.token_usage().map(|u| u.total_token_count()),
                    "Chat request completed"
                );
            }
            Err(e) => {
                self.record(outcome_for(e), Some(started));
                tracing::debug!(model_id = %self.model_id, error = %e, "Chat request failed");
            }
        }

        result
    }

    async fn generate_with_tools(
        &self,
        _messages: &[ChatMessage],
        tool_specifications: &[ToolSpecification],
    ) -> AppResult<Response<AiMessage>> {
        tracing::warn!(
            model_id = %self.model_id,
            tools = tool_specifications.len(),
            "Rejecting tool specifications: BAM chat does not support tools"
        );
        self.record(Outcome::Rejected, None);
        Err(AppError::tools_not_supported())
    }
}
