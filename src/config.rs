//! Configuration management for bam-chat
//!
//! Parses TOML configuration files and provides typed access to settings.
//! The `[bam]` table is the default model configuration; additional
//! configurations can be declared under `[named.<name>]` with the same shape.

use crate::bam::{DecodingMethod, Parameters};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    bam: BamConfig,
    #[serde(default)]
    named: BTreeMap<String, BamConfig>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Connection and model settings for one BAM configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct BamConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    api_key: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default = "default_timeout")]
    timeout_seconds: u64,
    #[serde(default)]
    log_requests: bool,
    #[serde(default)]
    log_responses: bool,
    #[serde(default)]
    chat_model: ChatModelConfig,
}

impl BamConfig {
    /// Create a configuration with default settings for the given endpoint
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            version: default_version(),
            timeout_seconds: default_timeout(),
            log_requests: false,
            log_responses: false,
            chat_model: ChatModelConfig::default(),
        }
    }

    /// Base URL of the BAM API (without the `/v2/...` path)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API version date sent as the `version` query parameter
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn log_requests(&self) -> bool {
        self.log_requests
    }

    pub fn log_responses(&self) -> bool {
        self.log_responses
    }

    pub fn chat_model(&self) -> &ChatModelConfig {
        &self.chat_model
    }

    /// Validate field ranges
    ///
    /// `Config::from_file()` validates every section it loads; call this when a
    /// `BamConfig` is deserialized or built on its own.
    pub fn validate(&self) -> AppResult<()> {
        self.validate_section("bam")
    }

    /// Validate field ranges, prefixing errors with `section`
    fn validate_section(&self, section: &str) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{}.api_key must not be empty",
                section
            )));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "{}.base_url '{}' must start with 'http://' or 'https://'",
                section, self.base_url
            )));
        }

        if self.version.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{}.version must not be empty",
                section
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::Config(format!(
                "{}.timeout_seconds must be greater than 0",
                section
            )));
        }
        if self.timeout_seconds > 300 {
            return Err(AppError::Config(format!(
                "{}.timeout_seconds cannot exceed 300 seconds (5 minutes), got {}",
                section, self.timeout_seconds
            )));
        }

        self.chat_model
            .validate()
            .map_err(|reason| AppError::Config(format!("{}.chat_model.{}", section, reason)))
    }
}

impl std::fmt::Debug for BamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("version", &self.version)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("log_requests", &self.log_requests)
            .field("log_responses", &self.log_responses)
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

/// Placeholder printed instead of API keys
pub(crate) const REDACTED: &str = "<redacted>";

fn default_base_url() -> String {
    "https://bam-api.res.ibm.com".to_string()
}

fn default_version() -> String {
    "2024-01-10".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Chat model defaults copied into every request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatModelConfig {
    #[serde(default = "default_model_id")]
    model_id: String,
    #[serde(default)]
    decoding_method: DecodingMethod,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default)]
    min_new_tokens: u32,
    #[serde(default = "default_max_new_tokens")]
    max_new_tokens: u32,
}

impl Default for ChatModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            decoding_method: DecodingMethod::default(),
            temperature: default_temperature(),
            min_new_tokens: 0,
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

impl ChatModelConfig {
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn decoding_method(&self) -> DecodingMethod {
        self.decoding_method
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn min_new_tokens(&self) -> u32 {
        self.min_new_tokens
    }

    pub fn max_new_tokens(&self) -> u32 {
        self.max_new_tokens
    }

    /// Wire parameters carrying every configured default
    pub fn parameters(&self) -> Parameters {
        Parameters::builder()
            .decoding_method(self.decoding_method)
            .temperature(self.temperature)
            .min_new_tokens(self.min_new_tokens)
            .max_new_tokens(self.max_new_tokens)
            .build()
    }

    fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be a finite number between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_new_tokens == 0 {
            return Err("max_new_tokens must be greater than 0".to_string());
        }
        if self.min_new_tokens > self.max_new_tokens {
            return Err(format!(
                "min_new_tokens ({}) cannot exceed max_new_tokens ({})",
                self.min_new_tokens, self.max_new_tokens
            ));
        }
        Ok(())
    }
}

fn default_model_id() -> String {
    "ibm/granite-13b-chat-v2".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_max_new_tokens() -> u32 {
    200
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: match e {
                    AppError::Config(reason) => reason,
                    other => other.to_string(),
                },
            })?;

        tracing::debug!(
            named_configs = config.named.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// The configuration declared under `[bam]`
    pub fn default_config(&self) -> &BamConfig {
        &self.bam
    }

    /// A configuration declared under `[named.<name>]`
    pub fn named_config(&self, name: &str) -> Option<&BamConfig> {
        self.named.get(name)
    }

    /// Names of all `[named.*]` configurations, sorted
    pub fn named_configs(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`; call it explicitly when a
    /// config is assembled by other means.
    pub fn validate(&self) -> AppResult<()> {
        self.bam.validate_section("bam")?;
        for (name, config) in &self.named {
            config.validate_section(&format!("named.{}", name))?;
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
[bam]
base_url = "http://localhost:8089"
api_key = "my-key"
version = "2024-01-10"
timeout_seconds = 5
log_requests = true

[bam.chat_model]
model_id = "meta-llama/llama-2-70b-chat"
decoding_method = "sample"
temperature = 0.5
min_new_tokens = 10
max_new_tokens = 300

[named.granite]
api_key = "other-key"

[observability]
log_level = "debug"
"#;

    #[test]
    fn test_config_from_str_parses_successfully() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let bam = config.default_config();
        assert_eq!(bam.base_url(), "http://localhost:8089");
        assert_eq!(bam.api_key(), "my-key");
        assert_eq!(bam.timeout_seconds(), 5);
        assert!(bam.log_requests());
        assert!(!bam.log_responses());
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_config_parses_chat_model() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let chat = config.default_config().chat_model();
        assert_eq!(chat.model_id(), "meta-llama/llama-2-70b-chat");
        assert_eq!(chat.decoding_method(), DecodingMethod::Sample);
        assert_eq!(chat.temperature(), 0.5);
        assert_eq!(chat.min_new_tokens(), 10);
        assert_eq!(chat.max_new_tokens(), 300);
    }

    #[test]
    fn test_named_config_uses_defaults() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let granite = config.named_config("granite").expect("named config");
        assert_eq!(granite.api_key(), "other-key");
        assert_eq!(granite.base_url(), "https://bam-api.res.ibm.com");
        assert_eq!(granite.version(), "2024-01-10");
        assert_eq!(granite.timeout_seconds(), 10);
        assert_eq!(granite.chat_model().model_id(), "ibm/granite-13b-chat-v2");
        assert_eq!(granite.chat_model().decoding_method(), DecodingMethod::Greedy);
        assert_eq!(granite.chat_model().temperature(), 1.0);
        assert_eq!(granite.chat_model().min_new_tokens(), 0);
        assert_eq!(granite.chat_model().max_new_tokens(), 200);
        assert!(config.named_config("missing").is_none());
        assert_eq!(config.named_configs().collect::<Vec<_>>(), vec!["granite"]);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_str("[bam]\napi_key = \"k\"\n").expect("should parse");
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.default_config().log_requests());
    }

    #[test]
    fn test_parameters_copied_from_chat_model() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let parameters = config.default_config().chat_model().parameters();
        assert_eq!(parameters.decoding_method(), Some(DecodingMethod::Sample));
        assert_eq!(parameters.temperature(), Some(0.5));
        assert_eq!(parameters.min_new_tokens(), Some(10));
        assert_eq!(parameters.max_new_tokens(), Some(300));
    }

    #[test]
    fn test_missing_api_key_is_parse_error() {
        let result = Config::from_str("[bam]\nbase_url = \"http://localhost\"\n");
        assert!(matches!(result, Err(AppError::ConfigParseFailed { .. })));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = Config::from_str("[bam]\napi_key = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("bam.api_key"), "got: {}", err);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Config::from_str("[bam]\napi_key = \"k\"\nbase_url = \"localhost:8080\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("base_url"), "got: {}", err);
    }

    #[test]
    fn test_timeout_bounds() {
        let zero = Config::from_str("[bam]\napi_key = \"k\"\ntimeout_seconds = 0\n");
        assert!(zero.is_err());
        let huge = Config::from_str("[bam]\napi_key = \"k\"\ntimeout_seconds = 301\n");
        assert!(huge.is_err());
        let max = Config::from_str("[bam]\napi_key = \"k\"\ntimeout_seconds = 300\n");
        assert!(max.is_ok());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let err = Config::from_str(
            "[bam]\napi_key = \"k\"\n[bam.chat_model]\ntemperature = 2.5\n",
        )
        .unwrap_err();
        assert!(
            err.to_string().contains("bam.chat_model.temperature"),
            "got: {}",
            err
        );
    }

    #[test]
    fn test_min_tokens_above_max_rejected() {
        let err = Config::from_str(
            "[bam]\napi_key = \"k\"\n[bam.chat_model]\nmin_new_tokens = 50\nmax_new_tokens = 20\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("min_new_tokens"), "got: {}", err);
    }

    #[test]
    fn test_named_config_is_validated() {
        let err = Config::from_str(
            "[bam]\napi_key = \"k\"\n[named.broken]\napi_key = \"\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("named.broken.api_key"), "got: {}", err);
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("my-key"), "got: {}", printed);
        assert!(!printed.contains("other-key"), "got: {}", printed);
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("http://localhost:8089"));
    }

    #[test]
    fn test_standalone_bam_config_validation() {
        let valid: BamConfig = toml::from_str("api_key = \"k\"\n").unwrap();
        assert!(valid.validate().is_ok());

        let zero_timeout: BamConfig =
            toml::from_str("api_key = \"k\"\ntimeout_seconds = 0\n").unwrap();
        let err = zero_timeout.validate().unwrap_err();
        assert!(
            err.to_string().contains("bam.timeout_seconds"),
            "got: {}",
            err
        );
    }

    #[test]
    fn test_unknown_decoding_method_rejected() {
        let result = Config::from_str(
            "[bam]\napi_key = \"k\"\n[bam.chat_model]\ndecoding_method = \"beam\"\n",
        );
        assert!(matches!(result, Err(AppError::ConfigParseFailed { .. })));
    }
}
