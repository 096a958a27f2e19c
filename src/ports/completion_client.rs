//! Completion Client Port - Interface to the hosted language model.
//!
//! The model is treated as an opaque text-completion service: given the
//! system instruction, the prior turns and one new user message, it returns
//! a single reply or fails.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl CompletionClient for EchoClient {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
//!         Ok(CompletionResponse::new(request.message, "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::ConversationTurn;

/// Port for language model completions.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate one reply for the request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Persona and profile context.
    pub system_instruction: String,
    /// Prior turns, oldest first. Does not include `message`.
    pub history: Vec<ConversationTurn>,
    /// The new user message, possibly augmented.
    pub message: String,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Trace ID for log correlation.
    pub trace_id: String,
}

impl CompletionRequest {
    /// Creates a request for one new message with no history.
    pub fn new(system_instruction: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
            message: message.into(),
            max_tokens: None,
            temperature: None,
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Sets the prior turns.
    pub fn with_history(mut self, history: impl Into<Vec<ConversationTurn>>) -> Self {
        self.history = history.into();
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated reply.
    pub content: String,
    /// Model that generated the reply.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
    /// Token usage, when the provider reports it.
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Creates a response that stopped naturally with unknown usage.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was blocked for safety.
    ContentFilter,
    /// Anything else the provider reported.
    Other,
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited or quota exhausted.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Reply was blocked by the provider's safety filters.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Reason for filtering.
        reason: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl CompletionError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is transient and worth one more attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited { .. }
                | CompletionError::Unavailable { .. }
                | CompletionError::Network(_)
                | CompletionError::Timeout { .. }
        )
    }
}
