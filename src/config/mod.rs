//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `UDAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use uday::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Transcripts stored in {}", config.storage.data_dir.display());
//! ```

mod ai;
mod error;
mod features;
mod runtime;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ConfigValidationError};
pub use features::FeatureFlags;
pub use runtime::RuntimeConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the Gemini API key has to be supplied
/// when the Gemini provider is selected. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Completion provider (Gemini or mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Transcript and user registry locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `UDAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `UDAY__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `UDAY__STORAGE__DATA_DIR=./data` -> `storage.data_dir = ./data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("UDAY").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
