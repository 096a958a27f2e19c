//! Resilient Completion Client - Deadline and bounded retry around any client.
//!
//! Each attempt is cut off after `timeout`. A retryable failure (rate limit,
//! unavailable, network, timeout) gets at most `max_retries` further attempts
//! after `retry_delay`. Non-retryable failures return immediately.
//!
//! # Example
//!
//! ```ignore
//! let client = ResilientCompletionClient::new(GeminiProvider::new(config)?)
//!     .with_timeout(Duration::from_secs(60))
//!     .with_max_retries(1);
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Wraps a completion client with a per-attempt deadline and bounded retry.
#[derive(Debug, Clone)]
pub struct ResilientCompletionClient<C> {
    inner: C,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl<C: CompletionClient> ResilientCompletionClient<C> {
    /// Wraps `inner` with a 60s deadline and a single retry.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            timeout: Duration::from_secs(60),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        match timeout(self.timeout, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for ResilientCompletionClient<C> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && retry_count < self.max_retries => {
                    tracing::info!(
                        trace_id = %request.trace_id,
                        attempt = retry_count + 1,
                        error = %err,
                        "Retrying completion"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        trace_id = %request.trace_id,
                        attempts = retry_count + 1,
                        error = %err,
                        "Completion failed"
                    );
                    return Err(err);
                }
            }

            sleep(self.retry_delay).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.inner.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionClient, MockError};

    fn wrap(mock: &MockCompletionClient) -> ResilientCompletionClient<MockCompletionClient> {
        ResilientCompletionClient::new(mock.clone()).with_retry_delay(Duration::ZERO)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("persona", "hello")
    }

    #[tokio::test]
    async fn passes_through_success() {
        let mock = MockCompletionClient::new().with_response("hi there");
        let response = wrap(&mock).complete(request()).await.unwrap();

        assert_eq!(response.content, "hi there");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn retries_once_on_transient_error() {
        let mock = MockCompletionClient::new()
            .with_error(MockError::Unavailable {
                message: "503".to_string(),
            })
            .with_response("recovered");

        let response = wrap(&mock).complete(request()).await.unwrap();

        assert_eq!(response.content, "recovered");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn gives_up_after_single_retry() {
        let mock = MockCompletionClient::new()
            .with_error(MockError::Network {
                message: "reset".to_string(),
            })
            .with_error(MockError::RateLimited { retry_after_secs: 5 })
            .with_response("never reached");

        let err = wrap(&mock).complete(request()).await.unwrap_err();

        assert!(matches!(err, CompletionError::RateLimited { .. }));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn does_not_retry_auth_failures() {
        let mock = MockCompletionClient::new()
            .with_error(MockError::AuthenticationFailed)
            .with_response("never reached");

        let err = wrap(&mock).complete(request()).await.unwrap_err();

        assert!(matches!(err, CompletionError::AuthenticationFailed));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn slow_attempt_times_out() {
        let mock = MockCompletionClient::new().with_delay(Duration::from_millis(500));
        let client = wrap(&mock)
            .with_timeout(Duration::from_millis(20))
            .with_max_retries(0);

        let err = client.complete(request()).await.unwrap_err();

        assert!(matches!(err, CompletionError::Timeout { .. }));
    }

    #[tokio::test]
    async fn reports_inner_provider_info() {
        let mock = MockCompletionClient::new();
        assert_eq!(wrap(&mock).provider_info().name, "mock");
    }
}
