//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid completion timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Invalid retry count (at most 1 retry is allowed)")]
    TooManyRetries,

    #[error("Invalid temperature (must be between 0.0 and 2.0)")]
    InvalidTemperature,

    #[error("Invalid max output tokens (must be at least 1)")]
    InvalidMaxOutputTokens,

    #[error("Invalid model name")]
    InvalidModel,

    #[error("Invalid API base URL")]
    InvalidBaseUrl,

    #[error("Users file name cannot be empty")]
    EmptyUsersFile,
}
