//! Conversation Store Port - Interface for persisting a user's transcript.
//!
//! A transcript is the ordered list of turns for one user, saved whole on
//! every write. Loading is strict (`load`) or lenient (`load_or_default`);
//! the lenient form treats missing and unreadable transcripts alike as an
//! empty history, so chat continuity stays best-effort.

use async_trait::async_trait;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::StorageKey;

/// Errors that can occur while loading a transcript
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("No transcript stored for: {0}")]
    NotFound(String),

    #[error("Transcript is corrupt: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Errors that can occur while saving a transcript
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize transcript: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving transcripts
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Load the transcript for a user
    ///
    /// # Errors
    /// - `LoadError::NotFound` if nothing was ever saved
    /// - `LoadError::Corrupt` if the stored data cannot be decoded
    async fn load(&self, key: &StorageKey) -> Result<Vec<ConversationTurn>, LoadError>;

    /// Overwrite the transcript for a user
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails
    async fn save(&self, key: &StorageKey, turns: &[ConversationTurn]) -> Result<(), StoreError>;

    /// Load the transcript, falling back to an empty history on any failure
    async fn load_or_default(&self, key: &StorageKey) -> Vec<ConversationTurn> {
        match self.load(key).await {
            Ok(turns) => turns,
            Err(LoadError::NotFound(_)) => {
                tracing::debug!(key = %key, "No stored transcript, starting fresh");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Discarding unreadable transcript");
                Vec::new()
            }
        }
    }
}
