//! Command-line interface for bam-chat
//!
//! Provides argument parsing and subcommand handling for the bam-chat binary.

use clap::{Parser, Subcommand};

/// Chat with models served by the BAM API
#[derive(Parser)]
#[command(name = "bam-chat")]
#[command(version)]
#[command(about = "Chat with models served by the BAM API")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send one message and print the reply
    Chat {
        /// Text substituted for {text} in the user message template
        text: String,

        /// System message sent before the user message
        #[arg(short, long)]
        system: Option<String>,

        /// User message template
        #[arg(short, long, default_value = "{text}")]
        user: String,

        /// Named configuration to use instead of [bam]
        #[arg(short, long)]
        model: Option<String>,

        /// Print Prometheus metrics after the reply
        #[arg(long)]
        metrics: bool,
    },
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# bam-chat Configuration
# ======================

# ─────────────────────────────────────────────────────────────────────────────
# DEFAULT MODEL CONFIGURATION
# ─────────────────────────────────────────────────────────────────────────────

[bam]
# Base URL of the BAM API
base_url = "https://bam-api.res.ibm.com"

# API key sent as a bearer token (required)
api_key = "your-api-key"

# API version date sent as the `version` query parameter
version = "2024-01-10"

# HTTP timeout in seconds (1-300)
timeout_seconds = 10

# Log request/response bodies at info level
log_requests = false
log_responses = false

[bam.chat_model]
model_id = "ibm/granite-13b-chat-v2"
# "greedy" or "sample"
decoding_method = "greedy"
# Sampling temperature (0.0-2.0)
temperature = 1.0
min_new_tokens = 0
max_new_tokens = 200

# ─────────────────────────────────────────────────────────────────────────────
# NAMED CONFIGURATIONS (Optional)
# ─────────────────────────────────────────────────────────────────────────────
#
# Select with `bam-chat chat --model <name> ...`
#
# [named.llama]
# api_key = "your-api-key"
#
# [named.llama.chat_model]
# model_id = "meta-llama/llama-2-70b-chat"
# max_new_tokens = 500

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"
"#
}
