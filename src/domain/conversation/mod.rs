//! Conversation module - turns, prompts and the per-user chat session.

mod prompt;
mod session;
mod turn;

pub use prompt::{augment_for_low_mood, system_instruction, welcome_message, GENTLE_INSTRUCTION};
pub use session::{ChatSession, DisplayMessage};
pub use turn::{ConversationTurn, TurnRole};
