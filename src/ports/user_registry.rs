//! User Registry Port - Interface for registered user profiles.
//!
//! Profiles are keyed by email. Registration overwrites any existing entry
//! for the same email.

use async_trait::async_trait;

use crate::domain::foundation::UserEmail;
use crate::domain::user::UserProfile;

/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize registry: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for storing and looking up user profiles
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Find the profile registered under an email
    async fn find(&self, email: &UserEmail) -> Result<Option<UserProfile>, RegistryError>;

    /// Register (or re-register) a profile under an email
    async fn register(&self, email: &UserEmail, profile: &UserProfile) -> Result<(), RegistryError>;
}
