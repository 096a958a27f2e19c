//! User application handlers.
//!
//! Registration and login against the user registry.

mod login_user;
mod register_user;

pub use login_user::{LoginError, LoginUserHandler, LoginUserQuery, LoginUserResult};
pub use register_user::{RegisterError, RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
