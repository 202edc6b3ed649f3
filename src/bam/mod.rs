//! BAM REST API surface
//!
//! Wire types for the text generation chat endpoint and the HTTP client
//! that sends them.

pub mod client;
pub mod types;

pub use client::{BamClient, CHAT_PATH};
pub use types::{
    ApiErrorBody, DecodingMethod, GenerationResult, Message, Parameters, ParametersBuilder,
    ROLE_ASSISTANT, ROLE_SYSTEM, ROLE_USER, StopReason, TextGenerationRequest,
    TextGenerationResponse,
};
