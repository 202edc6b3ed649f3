//! Prometheus metrics collection for bam-chat
//!
//! This module tracks:
//! - Chat requests by outcome
//! - Input and output tokens reported by the backend
//! - End-to-end request latency
//!
//! [`Metrics::render`] produces the Prometheus text format.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Request outcome enum for type-safe metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ApiError,
    TransportError,
    ParseError,
    /// Rejected before any HTTP call (e.g. tool specifications supplied)
    Rejected,
}

impl Outcome {
    /// Convert outcome to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ApiError => "api_error",
            Outcome::TransportError => "transport_error",
            Outcome::ParseError => "parse_error",
            Outcome::Rejected => "rejected",
        }
    }
}

/// Token direction for type-safe metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Input,
    Output,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Input => "input",
            TokenKind::Output => "output",
        }
    }
}

/// Metrics collector for chat model calls
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    requests_total: IntCounterVec,
    tokens_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Cardinality: 5 outcomes
        let requests_total = IntCounterVec::new(
            Opts::new(
                "bam_chat_requests_total",
                "Total number of chat requests by outcome",
            ),
            &["outcome"],
        )?;

        let tokens_total = IntCounterVec::new(
            Opts::new(
                "bam_chat_tokens_total",
                "Total tokens reported by the BAM API by direction",
            ),
            &["kind"],
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "bam_chat_request_duration_ms",
                "Chat request latency in milliseconds",
            )
            .buckets(vec![
                10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0,
            ]),
            &["outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(tokens_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            tokens_total,
            request_duration,
        })
    }

    /// Record a finished (or rejected) request
    pub fn record_request(&self, outcome: Outcome) -> Result<(), prometheus::Error> {
        self.requests_total
            .get_metric_with_label_values(&[outcome.as_str()])?
            .inc();
        Ok(())
    }

    /// Record token counts reported for a successful generation
    pub fn record_tokens(&self, kind: TokenKind, count: u32) -> Result<(), prometheus::Error> {
        self.tokens_total
            .get_metric_with_label_values(&[kind.as_str()])?
            .inc_by(u64::from(count));
        Ok(())
    }

    /// Record request duration
    ///
    /// # Errors
    ///
    /// Returns an error if `duration_ms` is NaN, infinite, or negative.
    pub fn record_duration(
        &self,
        outcome: Outcome,
        duration_ms: f64,
    ) -> Result<(), prometheus::Error> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(prometheus::Error::Msg(format!(
                "Histogram value must be finite and non-negative, got: {}",
                duration_ms
            )));
        }

        self.request_duration
            .get_metric_with_label_values(&[outcome.as_str()])?
            .observe(duration_ms);
        Ok(())
    }

    /// Current request count for an outcome
    pub fn requests(&self, outcome: Outcome) -> u64 {
        self.requests_total
            .get_metric_with_label_values(&[outcome.as_str()])
            .map(|c| c.get())
            .unwrap_or(0)
    }

    /// Current token count for a direction
    pub fn tokens(&self, kind: TokenKind) -> u64 {
        self.tokens_total
            .get_metric_with_label_values(&[kind.as_str()])
            .map(|c| c.get())
            .unwrap_or(0)
    }

    /// Gather all metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("Metrics output is not UTF-8: {}", e)))
    }
}
