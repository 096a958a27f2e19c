//! File-based User Registry Adapter
//!
//! All profiles live in one JSON object keyed by email. Every registration
//! reads the whole file, inserts the entry and writes it back.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::UserEmail;
use crate::domain::user::UserProfile;
use crate::ports::{RegistryError, UserRegistry};

type Entries = BTreeMap<String, UserProfile>;

/// File-based registry of user profiles
#[derive(Debug)]
pub struct FileUserRegistry {
    file_path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileUserRegistry {
    /// Create a registry backed by a single JSON file
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn read_entries(&self) -> Result<Entries, RegistryError> {
        if !self.file_path.exists() {
            return Ok(Entries::new());
        }

        let json = fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| RegistryError::IoError(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| RegistryError::Corrupt(e.to_string()))
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), RegistryError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RegistryError::IoError(format!("Failed to create directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| RegistryError::SerializationFailed(e.to_string()))?;

        let temp_path = self.file_path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| RegistryError::IoError(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|e| RegistryError::IoError(format!("Failed to rename file: {}", e)))
    }
}

#[async_trait]
impl UserRegistry for FileUserRegistry {
    async fn find(&self, email: &UserEmail) -> Result<Option<UserProfile>, RegistryError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(email.as_str()).cloned())
    }

    async fn register(&self, email: &UserEmail, profile: &UserProfile) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        let replaced = entries
            .insert(email.as_str().to_string(), profile.clone())
            .is_some();
        self.write_entries(&entries).await?;

        tracing::info!(email = %email, replaced, "Registered user");
        Ok(())
    }
}
