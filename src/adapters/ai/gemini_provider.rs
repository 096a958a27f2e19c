//! Gemini Provider - Implementation of CompletionClient for Google's Gemini API.
//!
//! Uses the non-streaming `generateContent` endpoint. The system instruction
//! is sent in its own field; prior turns go in `contents` with roles `user`
//! and `model`, followed by the new user message.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! Retries are not done here; wrap the provider in a
//! `ResilientCompletionClient` for that.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::TurnRole;
use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};

/// Default model for completions.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::InvalidRequest` if the API key is blank or
    /// the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, CompletionError> {
        if config.api_key().trim().is_empty() {
            return Err(CompletionError::InvalidRequest(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &CompletionRequest) -> GenerateRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .map(|turn| GeminiContent {
                role: Some(wire_role(turn.role).to_string()),
                parts: vec![GeminiPart {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.message.clone()),
            }],
        });

        let generation_config = if request.max_tokens.is_some() || request.temperature.is_some() {
            Some(GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        GenerateRequest {
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(request.system_instruction.clone()),
                }],
            }),
            contents,
            generation_config,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let body = Self::to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {}", e))
                } else {
                    CompletionError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, CompletionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, CompletionError> {
        let response = self.handle_response_status(response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(body, &self.config.model)
    }
}

#[async_trait]
impl CompletionClient for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        let response = self.send_request(&request).await?;
        let completion = self.parse_response(response).await?;

        tracing::debug!(
            trace_id = %request.trace_id,
            model = %completion.model,
            total_tokens = completion.usage.total_tokens,
            "Gemini completion succeeded"
        );
        Ok(completion)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

fn wire_role(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "user",
        TurnRole::Assistant => "model",
    }
}

/// Maps a non-success HTTP status to an error.
fn status_error(status: u16, error_body: &str) -> CompletionError {
    match status {
        401 | 403 => CompletionError::AuthenticationFailed,
        400 if error_body.contains("API_KEY_INVALID") => CompletionError::AuthenticationFailed,
        400 => CompletionError::InvalidRequest(error_body.to_string()),
        429 => CompletionError::rate_limited(parse_retry_delay(error_body)),
        500..=599 => CompletionError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => CompletionError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads `retryDelay` (e.g. "17s") from a quota error body. Defaults to 30.
fn parse_retry_delay(error_body: &str) -> u32 {
    let parsed = match serde_json::from_str::<serde_json::Value>(error_body) {
        Ok(value) => value,
        Err(_) => return 30,
    };

    parsed
        .pointer("/error/details")
        .and_then(|d| d.as_array())
        .into_iter()
        .flatten()
        .filter_map(|detail| detail.get("retryDelay").and_then(|v| v.as_str()))
        .filter_map(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .next()
        .unwrap_or(30)
}

fn into_completion(body: GenerateResponse, model: &str) -> Result<CompletionResponse, CompletionError> {
    let candidate = match body.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            return Err(match body.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => CompletionError::content_filtered(reason),
                None => CompletionError::parse("No candidates in response"),
            })
        }
    };

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Other,
    };

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(if finish_reason == FinishReason::ContentFilter {
            CompletionError::content_filtered("response blocked by safety filters")
        } else {
            CompletionError::parse("Empty response text")
        });
    }

    let usage = body
        .usage_metadata
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        model: body.model_version.unwrap_or_else(|| model.to_string()),
        finish_reason,
        usage,
    })
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
