//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps, error types and the state machine
//! trait that the rest of the UDAY domain is written in.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{SessionId, StorageKey, UserEmail};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
