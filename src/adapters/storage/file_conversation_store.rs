//! File-based Conversation Store Adapter
//!
//! Stores each user's transcript as a pretty-printed JSON array in
//! `{base_path}/history_{key}.json`. Each record has a `role` of `user` or
//! `model` and a `parts` list of text fragments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::{ConversationTurn, TurnRole};
use crate::domain::foundation::StorageKey;
use crate::ports::{ConversationStore, LoadError, StoreError};

/// On-disk record for one turn
#[derive(Debug, Serialize, Deserialize)]
struct TurnRecord {
    role: String,
    parts: Vec<String>,
}

impl From<&ConversationTurn> for TurnRecord {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Assistant => "model",
        };
        Self {
            role: role.to_string(),
            parts: vec![turn.text.clone()],
        }
    }
}

impl TryFrom<TurnRecord> for ConversationTurn {
    type Error = LoadError;

    fn try_from(record: TurnRecord) -> Result<Self, Self::Error> {
        let role = match record.role.as_str() {
            "user" => TurnRole::User,
            "model" | "assistant" => TurnRole::Assistant,
            other => return Err(LoadError::Corrupt(format!("unknown role: {}", other))),
        };
        Ok(ConversationTurn::new(role, record.parts.concat()))
    }
}

/// File-based storage for transcripts
#[derive(Debug, Clone)]
pub struct FileConversationStore {
    base_path: PathBuf,
}

impl FileConversationStore {
    /// Create a new store rooted at a directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileConversationStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the transcript file path for a key
    pub fn file_path(&self, key: &StorageKey) -> PathBuf {
        self.base_path.join(format!("history_{}.json", key.as_str()))
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ConversationStore for FileConversationStore {
    async fn load(&self, key: &StorageKey) -> Result<Vec<ConversationTurn>, LoadError> {
        let file_path = self.file_path(key);

        if !file_path.exists() {
            return Err(LoadError::NotFound(key.to_string()));
        }

        let json = fs::read_to_string(&file_path)
            .await
            .map_err(|e| LoadError::IoError(e.to_string()))?;

        let records: Vec<TurnRecord> =
            serde_json::from_str(&json).map_err(|e| LoadError::Corrupt(e.to_string()))?;

        records.into_iter().map(ConversationTurn::try_from).collect()
    }

    async fn save(&self, key: &StorageKey, turns: &[ConversationTurn]) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let records: Vec<TurnRecord> = turns.iter().map(TurnRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        // Write to a temporary file, then rename over the old transcript
        let file_path = self.file_path(key);
        let temp_path = file_path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to rename file: {}", e)))?;

        tracing::debug!(key = %key, turns = turns.len(), "Saved transcript");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key() -> StorageKey {
        StorageKey::sanitize("asha@example.com")
    }

    fn exchange() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::user("I can't sleep"),
            ConversationTurn::assistant("That sounds exhausting."),
        ]
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        store.save(&key(), &exchange()).await.unwrap();
        let loaded = store.load(&key()).await.unwrap();

        assert_eq!(loaded, exchange());
    }

    #[tokio::test]
    async fn file_is_named_after_sanitized_email() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        store.save(&key(), &exchange()).await.unwrap();

        assert!(temp_dir.path().join("history_asha_example_com.json").exists());
        assert!(!temp_dir.path().join("history_asha_example_com.json.tmp").exists());
    }

    #[tokio::test]
    async fn writes_user_and_model_roles_with_parts() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        store.save(&key(), &exchange()).await.unwrap();
        let raw = std::fs::read_to_string(store.file_path(&key())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                {"role": "user", "parts": ["I can't sleep"]},
                {"role": "model", "parts": ["That sounds exhausting."]}
            ])
        );
    }

    #[tokio::test]
    async fn reads_assistant_role_and_joins_parts() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        std::fs::write(
            store.file_path(&key()),
            r#"[{"role":"assistant","parts":["Hello ","there"]}]"#,
        )
        .unwrap();

        let loaded = store.load(&key()).await.unwrap();

        assert_eq!(loaded, vec![ConversationTurn::assistant("Hello there")]);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        let result = store.load(&key()).await;
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[tokio::test]
    async fn garbage_file_is_corrupt_and_lenient_load_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        std::fs::write(store.file_path(&key()), "{not json").unwrap();

        assert!(matches!(store.load(&key()).await, Err(LoadError::Corrupt(_))));
        assert!(store.load_or_default(&key()).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_role_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        std::fs::write(store.file_path(&key()), r#"[{"role":"system","parts":["x"]}]"#).unwrap();

        assert!(matches!(store.load(&key()).await, Err(LoadError::Corrupt(_))));
    }

    #[tokio::test]
    async fn save_overwrites_whole_transcript() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        store.save(&key(), &exchange()).await.unwrap();
        store
            .save(&key(), &[ConversationTurn::user("only")])
            .await
            .unwrap();

        assert_eq!(store.load(&key()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path().join("nested/data"));

        store.save(&key(), &exchange()).await.unwrap();
        assert_eq!(store.load(&key()).await.unwrap().len(), 2);
    }
}
