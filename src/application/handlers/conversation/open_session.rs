//! OpenSession - builds the chat session for a logged-in user.

use std::sync::Arc;

use crate::domain::conversation::ChatSession;
use crate::domain::foundation::UserEmail;
use crate::domain::screening::ScreeningInstrument;
use crate::domain::user::UserProfile;
use crate::ports::ConversationStore;

/// Command to open a session for a user.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub email: UserEmail,
    pub profile: UserProfile,
}

/// Handler for opening chat sessions.
///
/// Prior history is loaded leniently: a missing or unreadable transcript
/// starts the user with an empty history. The welcome greeting is posted
/// to the display log.
pub struct OpenSessionHandler {
    store: Arc<dyn ConversationStore>,
    allow_screening_restart: bool,
}

impl OpenSessionHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self {
            store,
            allow_screening_restart: false,
        }
    }

    pub fn with_screening_restart(mut self, allow: bool) -> Self {
        self.allow_screening_restart = allow;
        self
    }

    pub async fn handle(&self, cmd: OpenSessionCommand) -> ChatSession {
        let history = self.store.load_or_default(&cmd.email.storage_key()).await;
        let prior_turns = history.len();

        let mut session = ChatSession::new(cmd.email, cmd.profile, history).with_screening(
            ScreeningInstrument::new().with_restart_allowed(self.allow_screening_restart),
        );
        session.welcome();

        tracing::info!(
            session_id = %session.id(),
            email = %session.email(),
            prior_turns,
            "Opened chat session"
        );
        session
    }
}
