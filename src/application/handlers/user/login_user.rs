//! LoginUser - Query handler that looks a user up by email.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::UserEmail;
use crate::domain::user::UserProfile;
use crate::ports::UserRegistry;

/// Query to log a user in.
#[derive(Debug, Clone)]
pub struct LoginUserQuery {
    pub email: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginUserResult {
    pub email: UserEmail,
    pub profile: UserProfile,
}

/// Errors that can occur during login.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// No profile for this email. An unreadable registry also lands here.
    #[error("user not found: {0}")]
    NotFound(String),
}

/// Handler for logging users in.
pub struct LoginUserHandler {
    registry: Arc<dyn UserRegistry>,
}

impl LoginUserHandler {
    pub fn new(registry: Arc<dyn UserRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: LoginUserQuery) -> Result<LoginUserResult, LoginError> {
        let email = UserEmail::new(query.email.as_str())
            .map_err(|_| LoginError::NotFound(query.email.clone()))?;

        let found = match self.registry.find(&email).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(email = %email, error = %err, "User registry unreadable during login");
                None
            }
        };

        match found {
            Some(profile) => Ok(LoginUserResult { email, profile }),
            None => Err(LoginError::NotFound(email.as_str().to_string())),
        }
    }
}
