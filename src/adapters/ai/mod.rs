//! Completion Client Adapters.
//!
//! Implementations of the CompletionClient port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via `generateContent`
//! - `MockCompletionClient` - Configurable mock for testing and offline runs
//! - `ResilientCompletionClient` - Deadline and bounded retry around another client

mod gemini_provider;
mod mock_provider;
mod resilient_client;

pub use gemini_provider::{GeminiConfig, GeminiProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock_provider::{MockCompletionClient, MockError, MockResponse, DEFAULT_MOCK_REPLY};
pub use resilient_client::ResilientCompletionClient;
