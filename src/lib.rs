//! bam-chat - chat-model client for the BAM text generation API
//!
//! Maps conversations onto the BAM `/v2/text/chat` request shape, decodes
//! generation results into typed responses, and exposes declarative chat
//! services on top of the [`chat::ChatLanguageModel`] trait.

pub mod bam;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod telemetry;
