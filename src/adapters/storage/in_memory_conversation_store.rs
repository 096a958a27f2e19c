//! In-Memory Conversation Store Adapter
//!
//! Keeps transcripts in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::StorageKey;
use crate::ports::{ConversationStore, LoadError, StoreError};

/// In-memory storage for transcripts
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    transcripts: Arc<RwLock<HashMap<StorageKey, Vec<ConversationTurn>>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored transcripts
    pub async fn transcript_count(&self) -> usize {
        self.transcripts.read().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, key: &StorageKey) -> Result<Vec<ConversationTurn>, LoadError> {
        self.transcripts
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(key.to_string()))
    }

    async fn save(&self, key: &StorageKey, turns: &[ConversationTurn]) -> Result<(), StoreError> {
        self.transcripts
            .write()
            .await
            .insert(key.clone(), turns.to_vec());
        Ok(())
    }
}
