//! Screening error types.

use thiserror::Error;

/// Errors raised by the screening instrument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    /// The answer is not one of 0, 1, 2 or 3.
    #[error("invalid answer '{value}': choose 0, 1, 2 or 3")]
    InvalidAnswer { value: String },

    /// An answer arrived while no screening is running.
    #[error("no screening is in progress")]
    NotActive,

    /// `start` was called while a screening is already running.
    #[error("a screening is already in progress")]
    SessionAlreadyActive,
}

impl ScreeningError {
    /// Creates an invalid answer error.
    pub fn invalid_answer(value: impl Into<String>) -> Self {
        Self::InvalidAnswer { value: value.into() }
    }
}
