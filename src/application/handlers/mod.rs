//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;
pub mod user;

pub use conversation::{
    ConversationOrchestrator, OpenSessionCommand, OpenSessionHandler, Reply, RespondError,
    ResponseRoute,
};
pub use user::{
    LoginError, LoginUserHandler, LoginUserQuery, LoginUserResult, RegisterError,
    RegisterUserCommand, RegisterUserHandler, RegisterUserResult,
};
