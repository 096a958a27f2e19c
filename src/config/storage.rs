//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigValidationError;

/// Where transcripts and the user registry live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `history_*.json` files and the users file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Users file name, relative to `data_dir`
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

impl StorageConfig {
    /// Full path of the users file
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.users_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUsersFile);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_users_file() -> String {
    "users.json".to_string()
}
