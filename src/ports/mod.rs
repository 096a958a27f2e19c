//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - The hosted language model
//! - `ConversationStore` - Per-user transcript persistence
//! - `UserRegistry` - Registered user profiles

mod completion_client;
mod conversation_store;
mod user_registry;

pub use completion_client::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};
pub use conversation_store::{ConversationStore, LoadError, StoreError};
pub use user_registry::{RegistryError, UserRegistry};
