//! Storage Adapters
//!
//! Implementations of the ConversationStore and UserRegistry ports.
//!
//! ## Available Adapters
//!
//! - **FileConversationStore** - One JSON transcript file per user
//! - **InMemoryConversationStore** - Transcripts in memory (testing/development)
//! - **FileUserRegistry** - Shared JSON file of profiles keyed by email
//! - **InMemoryUserRegistry** - Profiles in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileConversationStore, FileUserRegistry};
//!
//! let store = FileConversationStore::new("./data");
//! let registry = FileUserRegistry::new("./data/users.json");
//! ```

mod file_conversation_store;
mod file_user_registry;
mod in_memory_conversation_store;
mod in_memory_user_registry;

pub use file_conversation_store::FileConversationStore;
pub use file_user_registry::FileUserRegistry;
pub use in_memory_conversation_store::InMemoryConversationStore;
pub use in_memory_user_registry::InMemoryUserRegistry;
