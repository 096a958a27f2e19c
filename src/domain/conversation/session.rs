//! Chat session - everything one logged-in user's conversation owns.
//!
//! The session is a plain value owned by the caller (the shell) and lent
//! `&mut` to the orchestrator for each message. Nothing here is global.

use crate::domain::foundation::{SessionId, StorageKey, Timestamp, UserEmail};
use crate::domain::screening::ScreeningInstrument;
use crate::domain::user::UserProfile;

use super::prompt::{system_instruction, welcome_message};
use super::turn::{ConversationTurn, TurnRole};

/// A message as displayed in the chat window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub role: TurnRole,
    pub content: String,
    pub at: Timestamp,
}

impl DisplayMessage {
    fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Timestamp::now(),
        }
    }

    /// "14:05"
    pub fn time_label(&self) -> String {
        self.at.clock_label()
    }
}

/// One user's live conversation.
///
/// # Invariants
///
/// - `history` only grows, two turns (user, assistant) at a time
/// - `system_instruction` is derived from the profile once, at construction
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    email: UserEmail,
    profile: UserProfile,
    system_instruction: String,
    history: Vec<ConversationTurn>,
    screening: ScreeningInstrument,
    display: Vec<DisplayMessage>,
    welcomed: bool,
}

impl ChatSession {
    /// Opens a session over previously stored turns.
    pub fn new(email: UserEmail, profile: UserProfile, history: Vec<ConversationTurn>) -> Self {
        Self {
            id: SessionId::new(),
            system_instruction: system_instruction(&profile),
            email,
            profile,
            history,
            screening: ScreeningInstrument::new(),
            display: Vec::new(),
            welcomed: false,
        }
    }

    /// Replaces the screening instrument (e.g. one that allows restarts).
    pub fn with_screening(mut self, screening: ScreeningInstrument) -> Self {
        self.screening = screening;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn email(&self) -> &UserEmail {
        &self.email
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn storage_key(&self) -> StorageKey {
        self.email.storage_key()
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Turns the model has seen, oldest first.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn screening(&self) -> &ScreeningInstrument {
        &self.screening
    }

    pub fn screening_mut(&mut self) -> &mut ScreeningInstrument {
        &mut self.screening
    }

    /// Messages shown in the chat window this session.
    pub fn display_log(&self) -> &[DisplayMessage] {
        &self.display
    }

    /// Posts the welcome greeting the first time it is called.
    pub fn welcome(&mut self) -> Option<&DisplayMessage> {
        if self.welcomed {
            return None;
        }
        self.welcomed = true;
        self.display
            .push(DisplayMessage::new(TurnRole::Assistant, welcome_message(&self.profile)));
        self.display.last()
    }

    /// History extended with one exchange, for persisting before committing.
    pub fn history_with(&self, user_text: &str, reply: &str) -> Vec<ConversationTurn> {
        let mut turns = Vec::with_capacity(self.history.len() + 2);
        turns.extend_from_slice(&self.history);
        turns.push(ConversationTurn::user(user_text));
        turns.push(ConversationTurn::assistant(reply));
        turns
    }

    /// Records one exchange in both the transcript and the display log.
    pub fn commit_exchange(&mut self, user_text: &str, reply: &str) {
        self.history.push(ConversationTurn::user(user_text));
        self.history.push(ConversationTurn::assistant(reply));
        self.display.push(DisplayMessage::new(TurnRole::User, user_text));
        self.display.push(DisplayMessage::new(TurnRole::Assistant, reply));
    }

    /// Records a message that only belongs in the chat window.
    pub fn post_notice(&mut self, reply: &str) {
        self.display.push(DisplayMessage::new(TurnRole::Assistant, reply));
    }
}
