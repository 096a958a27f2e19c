//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ConversationOrchestrator, LoginError, LoginUserHandler, LoginUserQuery, LoginUserResult,
    OpenSessionCommand, OpenSessionHandler, RegisterError, RegisterUserCommand,
    RegisterUserHandler, RegisterUserResult, Reply, RespondError, ResponseRoute,
};
