//! Completion provider configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ConfigValidationError;

/// Completion provider configuration
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider answers chat messages
    #[serde(default)]
    pub provider: AiProvider,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Reply length cap; provider default when unset
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

/// Completion provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    /// Canned replies, no network. For demos and offline runs.
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate completion provider configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider == AiProvider::Gemini && !self.has_gemini_key() {
            return Err(ConfigValidationError::MissingRequired("UDAY__AI__GEMINI_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.max_retries > 1 {
            return Err(ConfigValidationError::TooManyRetries);
        }
        if self.temperature.is_some_and(|t| !(0.0..=2.0).contains(&t)) {
            return Err(ConfigValidationError::InvalidTemperature);
        }
        if self.max_output_tokens == Some(0) {
            return Err(ConfigValidationError::InvalidMaxOutputTokens);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::InvalidModel);
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    1
}
