//! Conversation command handlers.
//!
//! Opening a user's chat session and responding to their messages.

mod open_session;
mod respond;

pub use open_session::{OpenSessionCommand, OpenSessionHandler};
pub use respond::{ConversationOrchestrator, Reply, RespondError, ResponseRoute, SCREENING_TRIGGER};
