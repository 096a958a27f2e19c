//! RegisterUser - Command handler for creating (or replacing) a user profile.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{UserEmail, ValidationError};
use crate::domain::user::{FocusArea, Profession, UserProfile};
use crate::ports::{RegistryError, UserRegistry};

/// Command to register a user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub name: String,
    pub age: String,
    pub profession: Profession,
    pub focus: FocusArea,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub email: UserEmail,
    pub profile: UserProfile,
}

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("invalid registration: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not save registration: {0}")]
    Registry(#[from] RegistryError),
}

/// Handler for registering users.
///
/// Registering an email that already exists replaces its profile.
pub struct RegisterUserHandler {
    registry: Arc<dyn UserRegistry>,
}

impl RegisterUserHandler {
    pub fn new(registry: Arc<dyn UserRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<RegisterUserResult, RegisterError> {
        let email = UserEmail::new(cmd.email)?;
        let profile = UserProfile::new(cmd.name, cmd.age, cmd.profession, cmd.focus)?;

        self.registry.register(&email, &profile).await?;

        Ok(RegisterUserResult { email, profile })
    }
}
