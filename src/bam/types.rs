//! BAM text generation wire types
//!
//! These types mirror the JSON accepted and returned by the `/v2/text/chat`
//! endpoint. Field names are snake_case on the wire.

use serde::{Deserialize, Serialize};

/// Role label used by the BAM chat endpoint
pub const ROLE_SYSTEM: &str = "system";
/// Role label used by the BAM chat endpoint
pub const ROLE_USER: &str = "user";
/// Role label used by the BAM chat endpoint
pub const ROLE_ASSISTANT: &str = "assistant";

/// A single conversation turn as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: String,
    content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Token sampling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodingMethod {
    #[default]
    Greedy,
    Sample,
}

/// Generation parameters
///
/// Unset parameters are omitted from the request body so the backend applies
/// its own defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    decoding_method: Option<DecodingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    pub fn decoding_method(&self) -> Option<DecodingMethod> {
        self.decoding_method
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn min_new_tokens(&self) -> Option<u32> {
        self.min_new_tokens
    }

    pub fn max_new_tokens(&self) -> Option<u32> {
        self.max_new_tokens
    }
}

/// Builder for [`Parameters`]
#[derive(Debug, Default)]
pub struct ParametersBuilder {
    inner: Parameters,
}

impl ParametersBuilder {
    pub fn decoding_method(mut self, method: DecodingMethod) -> Self {
        self.inner.decoding_method = Some(method);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.inner.temperature = Some(temperature);
        self
    }

    pub fn min_new_tokens(mut self, tokens: u32) -> Self {
        self.inner.min_new_tokens = Some(tokens);
        self
    }

    pub fn max_new_tokens(mut self, tokens: u32) -> Self {
        self.inner.max_new_tokens = Some(tokens);
        self
    }

    pub fn build(self) -> Parameters {
        self.inner
    }
}

/// Request body for the chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationRequest {
    model_id: String,
    messages: Vec<Message>,
    parameters: Parameters,
}

impl TextGenerationRequest {
    pub fn new(model_id: impl Into<String>, messages: Vec<Message>, parameters: Parameters) -> Self {
        Self {
            model_id: model_id.into(),
            messages,
            parameters,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

/// Why the backend stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    NotFinished,
    MaxTokens,
    EosToken,
    Cancelled,
    TimeLimit,
    StopSequence,
    TokenLimit,
    Error,
    #[serde(other)]
    Unknown,
}

/// One generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub generated_text: String,
    pub generated_token_count: u32,
    pub input_token_count: u32,
    pub stop_reason: StopReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Response body of the chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationResponse {
    pub results: Vec<GenerationResult>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Human-readable summary, preferring `message` over `error`
    pub fn summary(&self) -> Option<String> {
        match (&self.error, &self.message) {
            (Some(error), Some(message)) => Some(format!("{}: {}", error, message)),
            (None, Some(message)) => Some(message.clone()),
            (Some(error), None) => Some(error.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIXTURE: &str = r#"{
        "results": [
            {
                "generated_token_count": 20,
                "input_token_count": 146,
                "stop_reason": "max_tokens",
                "seed": 40268626,
                "generated_text": "AI Response"
            }
        ]
    }"#;

    #[test]
    fn test_request_wire_shape() {
        let parameters = Parameters::builder()
            .decoding_method(DecodingMethod::Greedy)
            .temperature(1.0)
            .min_new_tokens(0)
            .max_new_tokens(200)
            .build();
        let request = TextGenerationRequest::new(
            "ibm/granite-13b-chat-v2",
            vec![
                Message::new(ROLE_SYSTEM, "This is a systemMessage"),
                Message::new(ROLE_USER, "This is a userMessage Hello"),
            ],
            parameters,
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model_id": "ibm/granite-13b-chat-v2",
                "messages": [
                    {"role": "system", "content": "This is a systemMessage"},
                    {"role": "user", "content": "This is a userMessage Hello"}
                ],
                "parameters": {
                    "decoding_method": "greedy",
                    "temperature": 1.0,
                    "min_new_tokens": 0,
                    "max_new_tokens": 200
                }
            })
        );
    }

    #[test]
    fn test_unset_parameters_are_omitted() {
        let parameters = Parameters::builder().max_new_tokens(50).build();
        assert_eq!(
            serde_json::to_value(&parameters).unwrap(),
            json!({"max_new_tokens": 50})
        );
        assert_eq!(
            serde_json::to_value(Parameters::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_response_fixture_parses() {
        let response: TextGenerationResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(response.results.len(), 1);
        let result = &response.results[0];
        assert_eq!(result.generated_text, "AI Response");
        assert_eq!(result.generated_token_count, 20);
        assert_eq!(result.input_token_count, 146);
        assert_eq!(result.stop_reason, StopReason::MaxTokens);
        assert_eq!(result.seed, Some(40268626));
    }

    #[test]
    fn test_unknown_stop_reason_is_tolerated() {
        let reason: StopReason = serde_json::from_str(r#""something_new""#).unwrap();
        assert_eq!(reason, StopReason::Unknown);
    }

    #[test]
    fn test_decoding_method_lowercase() {
        assert_eq!(
            serde_json::to_string(&DecodingMethod::Sample).unwrap(),
            r#""sample""#
        );
        assert_eq!(
            serde_json::from_str::<DecodingMethod>(r#""greedy""#).unwrap(),
            DecodingMethod::Greedy
        );
    }

    #[test]
    fn test_api_error_summary() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"status_code": 401, "error": "Unauthorized", "message": "API key not found"}"#,
        )
        .unwrap();
        assert_eq!(
            body.summary().as_deref(),
            Some("Unauthorized: API key not found")
        );

        let empty: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.summary().is_none());
    }
}
