//! HTTP client for the BAM REST API

use super::types::{ApiErrorBody, TextGenerationRequest, TextGenerationResponse};
use crate::config::{BamConfig, REDACTED};
use crate::error::{AppError, AppResult};
use std::time::Duration;

/// Path of the chat endpoint, relative to the configured base URL
pub const CHAT_PATH: &str = "/v2/text/chat";

/// Thin wrapper around `reqwest::Client` bound to one BAM configuration
#[derive(Clone)]
pub struct BamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    version: String,
    log_requests: bool,
    log_responses: bool,
}

impl std::fmt::Debug for BamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BamClient")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("version", &self.version)
            .field("log_requests", &self.log_requests)
            .field("log_responses", &self.log_responses)
            .finish_non_exhaustive()
    }
}

impl BamClient {
    /// Build a client from a validated configuration
    pub fn new(config: &BamConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
            version: config.version().to_string(),
            log_requests: config.log_requests(),
            log_responses: config.log_responses(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }

    /// Send a chat request and decode the generation results
    pub async fn chat(&self, request: &TextGenerationRequest) -> AppResult<TextGenerationResponse> {
        let url = self.chat_url();

        if self.log_requests {
            tracing::info!(
                url = %url,
                version = %self.version,
                body = %serde_json::to_string(request).unwrap_or_default(),
                "BAM request"
            );
        }

        let response = self
            .http
            .post(&url)
            .query(&[("version", self.version.as_str())])
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| AppError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| AppError::Http {
            url: url.clone(),
            source,
        })?;

        if self.log_responses {
            tracing::info!(
                url = %url,
                status = %status,
                body = %body,
                "BAM response"
            );
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.summary())
                .unwrap_or(body);
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                error = %message,
                "BAM API returned an error status"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| AppError::ResponseParse(e.to_string()))
    }
}
