//! In-Memory User Registry Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserEmail;
use crate::domain::user::UserProfile;
use crate::ports::{RegistryError, UserRegistry};

/// In-memory registry of user profiles (testing/development)
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRegistry {
    users: Arc<RwLock<HashMap<UserEmail, UserProfile>>>,
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of registered users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn find(&self, email: &UserEmail) -> Result<Option<UserProfile>, RegistryError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn register(&self, email: &UserEmail, profile: &UserProfile) -> Result<(), RegistryError> {
        self.users
            .write()
            .await
            .insert(email.clone(), profile.clone());
        Ok(())
    }
}
