//! Error types for bam-chat
//!
//! Every fallible operation in the crate returns [`AppResult`].

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    /// The backend cannot honour the request at all (e.g. tool calling).
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("BAM API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse BAM response: {0}")]
    ResponseParse(String),

    #[error("BAM response contained no results")]
    EmptyResults,

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error returned whenever tool specifications reach the BAM chat model
    pub fn tools_not_supported() -> Self {
        Self::UnsupportedFeature("tools are currently not supported by this model".to_string())
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_creates() {
        let err = AppError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_unsupported_feature_message() {
        let err = AppError::tools_not_supported();
        assert_eq!(
            err.to_string(),
            "Unsupported feature: tools are currently not supported by this model"
        );
    }

    #[test]
    fn test_api_error_includes_status() {
        let err = AppError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "BAM API returned 401: Unauthorized");
    }

    #[test]
    fn test_empty_results_error() {
        assert_eq!(
            AppError::EmptyResults.to_string(),
            "BAM response contained no results"
        );
    }

    #[test]
    fn test_config_validation_failed_names_path() {
        let err = AppError::ConfigValidationFailed {
            path: "config.toml".to_string(),
            reason: "bam.api_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("config.toml"));
        assert!(err.to_string().contains("api_key"));
    }
}
