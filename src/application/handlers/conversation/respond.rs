//! Respond - routes each user message to exactly one response path.
//!
//! Order, first match wins:
//! 1. A screening is running: the message is the answer.
//! 2. Crisis language: return the helpline message, never the model.
//! 3. The message mentions "screening" and none has been completed: start one.
//! 4. Low sentiment: append the gentle-tone instruction to the outgoing text.
//! 5. Ask the model with the full prior history.
//!
//! Every path records the exchange, persists the transcript and then
//! updates the session. A failed completion or save leaves the session as it
//! was before the message.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{augment_for_low_mood, ChatSession};
use crate::domain::screening::{AnswerValue, ScreeningError, ScreeningInstrument};
use crate::domain::wellness::{CrisisDetector, SentimentGate};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest, ConversationStore, StoreError};

/// Word in a chat message that starts the screening.
pub const SCREENING_TRIGGER: &str = "screening";

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRoute {
    /// The screening intro was shown.
    ScreeningStarted,
    /// A screening answer was scored. `completed` is set on the last one.
    ScreeningAnswer { completed: bool },
    /// Crisis language was detected.
    Crisis,
    /// The model answered. `gentle` is set when the low-mood note was added.
    Model { gentle: bool },
}

/// A reply to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub route: ResponseRoute,
}

impl Reply {
    fn new(text: impl Into<String>, route: ResponseRoute) -> Self {
        Self {
            text: text.into(),
            route,
        }
    }
}

/// Errors that can occur while responding to a message.
#[derive(Debug, Error)]
pub enum RespondError {
    /// Message is empty or whitespace only.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// Screening rejected the request (bad answer, already running).
    #[error(transparent)]
    Screening(#[from] ScreeningError),

    /// The screening has already been taken this session.
    #[error("screening already completed for this session")]
    ScreeningAlreadyCompleted,

    /// The model could not produce a reply.
    #[error("completion unavailable: {0}")]
    CompletionUnavailable(#[from] CompletionError),

    /// The transcript could not be saved.
    #[error("failed to save conversation: {0}")]
    Storage(#[from] StoreError),
}

impl RespondError {
    /// Text safe to show the user in place of a reply.
    pub fn user_message(&self) -> String {
        match self {
            RespondError::EmptyMessage => "Please type a message so I can respond. 😊".to_string(),
            RespondError::Screening(ScreeningError::InvalidAnswer { .. }) => {
                "Please answer with a number from 0 to 3.".to_string()
            }
            RespondError::Screening(err) => format!("{}.", capitalize(&err.to_string())),
            RespondError::ScreeningAlreadyCompleted => {
                "You've already completed the screening check-in today. 💚".to_string()
            }
            RespondError::CompletionUnavailable(_) => {
                "I'm having trouble responding right now. Please try again in a moment. 💙"
                    .to_string()
            }
            RespondError::Storage(_) => {
                "I couldn't save our conversation just now. Please try again.".to_string()
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Routes user messages through screening, crisis, sentiment and the model.
pub struct ConversationOrchestrator {
    completion_client: Arc<dyn CompletionClient>,
    store: Arc<dyn ConversationStore>,
    crisis: CrisisDetector,
    sentiment: SentimentGate,
    sentiment_gate_enabled: bool,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ConversationOrchestrator {
    pub fn new(
        completion_client: Arc<dyn CompletionClient>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            completion_client,
            store,
            crisis: CrisisDetector::new(),
            sentiment: SentimentGate::new(),
            sentiment_gate_enabled: true,
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Turns the low-mood augmentation on or off.
    pub fn with_sentiment_gate(mut self, enabled: bool) -> Self {
        self.sentiment_gate_enabled = enabled;
        self
    }

    /// Generation settings sent with every model request. `None` keeps the provider default.
    pub fn with_generation(mut self, max_output_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self.temperature = temperature;
        self
    }

    /// Produces the reply for one raw user message.
    pub async fn respond(&self, session: &mut ChatSession, raw: &str) -> Result<Reply, RespondError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(RespondError::EmptyMessage);
        }

        if session.screening().is_active() {
            let answer: AnswerValue = text.parse()?;
            return self.answer_screening(session, text, answer).await;
        }

        if let Some(response) = self.crisis.check(text) {
            tracing::warn!(
                session_id = %session.id(),
                keyword = self.crisis.matched_keyword(text).unwrap_or_default(),
                "Crisis language detected, returning helpline response"
            );
            return self
                .commit(session, text, Reply::new(response, ResponseRoute::Crisis), None)
                .await;
        }

        if text.to_lowercase().contains(SCREENING_TRIGGER) && !session.screening().is_completed() {
            let mut screening = session.screening().clone();
            let intro = screening.start()?;
            tracing::info!(session_id = %session.id(), "Screening started from chat");
            return self
                .commit(session, text, Reply::new(intro, ResponseRoute::ScreeningStarted), Some(screening))
                .await;
        }

        let gentle = self.sentiment_gate_enabled && self.sentiment.is_emotionally_low(text);
        let outgoing = if gentle {
            augment_for_low_mood(text)
        } else {
            text.to_string()
        };

        let mut request = CompletionRequest::new(session.system_instruction(), outgoing)
            .with_history(session.history());
        if let Some(max) = self.max_output_tokens {
            request = request.with_max_tokens(max);
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        tracing::debug!(
            session_id = %session.id(),
            trace_id = %request.trace_id,
            history_turns = session.history().len(),
            gentle,
            "Dispatching message to model"
        );

        let response = self.completion_client.complete(request).await?;

        self.commit(
            session,
            text,
            Reply::new(response.content, ResponseRoute::Model { gentle }),
            None,
        )
        .await
    }

    /// Starts the screening on explicit request (button or command).
    ///
    /// The intro is only shown, not stored in the transcript.
    pub fn start_screening(&self, session: &mut ChatSession) -> Result<Reply, RespondError> {
        if session.screening().is_completed() {
            return Err(RespondError::ScreeningAlreadyCompleted);
        }

        let intro = session.screening_mut().start()?;
        session.post_notice(intro);
        tracing::info!(session_id = %session.id(), "Screening started");

        Ok(Reply::new(intro, ResponseRoute::ScreeningStarted))
    }

    /// Scores an answer picked from the option list, skipping text parsing.
    pub async fn submit_screening_answer(
        &self,
        session: &mut ChatSession,
        answer: AnswerValue,
    ) -> Result<Reply, RespondError> {
        if !session.screening().is_active() {
            return Err(ScreeningError::NotActive.into());
        }

        let text = answer.value().to_string();
        self.answer_screening(session, &text, answer).await
    }

    async fn answer_screening(
        &self,
        session: &mut ChatSession,
        text: &str,
        answer: AnswerValue,
    ) -> Result<Reply, RespondError> {
        let mut screening = session.screening().clone();
        let outcome = screening.process(answer)?;
        let completed = screening.is_completed();

        if let Some(result) = screening.result() {
            tracing::info!(
                session_id = %session.id(),
                score = result.score,
                severity = %result.severity,
                "Screening completed"
            );
        }

        let reply = Reply::new(outcome.message(), ResponseRoute::ScreeningAnswer { completed });
        self.commit(session, text, reply, Some(screening)).await
    }

    /// Persists the exchange, then applies it (and any screening update) to the session.
    async fn commit(
        &self,
        session: &mut ChatSession,
        user_text: &str,
        reply: Reply,
        screening: Option<ScreeningInstrument>,
    ) -> Result<Reply, RespondError> {
        let turns = session.history_with(user_text, &reply.text);
        self.store.save(&session.storage_key(), &turns).await?;

        session.commit_exchange(user_text, &reply.text);
        if let Some(screening) = screening {
            *session.screening_mut() = screening;
        }

        tracing::debug!(session_id = %session.id(), route = ?reply.route, "Replied");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionClient, MockError};
    use crate::adapters::storage::InMemoryConversationStore;
    use crate::domain::conversation::{ConversationTurn, GENTLE_INSTRUCTION};
    use crate::domain::foundation::{StorageKey, UserEmail};
    use crate::domain::screening::{QUESTIONS, QUESTION_COUNT};
    use crate::domain::user::{FocusArea, Profession, UserProfile};
    use crate::domain::wellness::CRISIS_RESPONSE;
    use crate::ports::LoadError;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl ConversationStore for FailingStore {
        async fn load(&self, key: &StorageKey) -> Result<Vec<ConversationTurn>, LoadError> {
            Err(LoadError::NotFound(key.to_string()))
        }

        async fn save(&self, _key: &StorageKey, _turns: &[ConversationTurn]) -> Result<(), StoreError> {
            Err(StoreError::IoError("disk full".to_string()))
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(
            UserEmail::new("kavya@example.com").unwrap(),
            UserProfile::new("Kavya", "22", Profession::Student, FocusArea::Overthinking).unwrap(),
            Vec::new(),
        )
    }

    fn orchestrator(
        mock: &MockCompletionClient,
    ) -> (ConversationOrchestrator, InMemoryConversationStore) {
        let store = InMemoryConversationStore::new();
        let orchestrator =
            ConversationOrchestrator::new(Arc::new(mock.clone()), Arc::new(store.clone()));
        (orchestrator, store)
    }

    #[tokio::test]
    async fn plain_message_goes_to_model_and_is_persisted() {
        let mock = MockCompletionClient::new().with_response("Tell me more.");
        let (orchestrator, store) = orchestrator(&mock);
        let mut session = session();

        let reply = orchestrator.respond(&mut session, "I had a long day").await.unwrap();

        assert_eq!(reply.text, "Tell me more.");
        assert_eq!(reply.route, ResponseRoute::Model { gentle: false });
        assert_eq!(
            session.history(),
            &[
                ConversationTurn::user("I had a long day"),
                ConversationTurn::assistant("Tell me more."),
            ]
        );
        assert_eq!(store.load(&session.storage_key()).await.unwrap(), session.history());
    }

    #[tokio::test]
    async fn model_receives_prior_history_and_system_instruction() {
        let mock = MockCompletionClient::new().with_response("one").with_response("two");
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.respond(&mut session, "first").await.unwrap();
        orchestrator.respond(&mut session, "second").await.unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.message, "second");
        assert_eq!(call.history.len(), 2);
        assert!(call.system_instruction.contains("Kavya"));
    }

    #[tokio::test]
    async fn crisis_message_never_reaches_model() {
        let mock = MockCompletionClient::new();
        let (orchestrator, store) = orchestrator(&mock);
        let mut session = session();

        let reply = orchestrator
            .respond(&mut session, "I want to end my life")
            .await
            .unwrap();

        assert_eq!(reply.text, CRISIS_RESPONSE);
        assert_eq!(reply.route, ResponseRoute::Crisis);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(store.load(&session.storage_key()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn crisis_wins_over_screening_trigger() {
        let mock = MockCompletionClient::new();
        let (orchestrator, store) = orchestrator(&mock);
        let mut session = session();

        let reply = orchestrator
            .respond(&mut session, "I want to end my life, is there a screening for that?")
            .await
            .unwrap();

        assert_eq!(reply.route, ResponseRoute::Crisis);
        assert_eq!(reply.text, CRISIS_RESPONSE);
        assert!(!session.screening().is_active());
        assert_eq!(mock.call_count(), 0);
        assert_eq!(store.load(&session.storage_key()).await.unwrap()[1].text, CRISIS_RESPONSE);
    }

    #[tokio::test]
    async fn generation_settings_reach_the_model() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let orchestrator = orchestrator.with_generation(Some(400), Some(0.6));
        let mut session = session();

        orchestrator.respond(&mut session, "hello").await.unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.max_tokens, Some(400));
        assert_eq!(call.temperature, Some(0.6));
    }

    #[tokio::test]
    async fn generation_settings_default_to_provider() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.respond(&mut session, "hello").await.unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.max_tokens, None);
        assert_eq!(call.temperature, None);
    }

    #[tokio::test]
    async fn low_mood_message_is_augmented_but_stored_original() {
        let mock = MockCompletionClient::new().with_response("I'm here.");
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();
        let text = "I feel hopeless and worthless";

        let reply = orchestrator.respond(&mut session, text).await.unwrap();

        assert_eq!(reply.route, ResponseRoute::Model { gentle: true });
        let call = mock.last_call().unwrap();
        assert!(call.message.ends_with(GENTLE_INSTRUCTION));
        assert!(call.message.starts_with(text));
        assert_eq!(session.history()[0], ConversationTurn::user(text));
    }

    #[tokio::test]
    async fn disabled_gate_sends_text_unchanged() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let orchestrator = orchestrator.with_sentiment_gate(false);
        let mut session = session();

        orchestrator
            .respond(&mut session, "I feel hopeless and worthless")
            .await
            .unwrap();

        assert!(!mock.last_call().unwrap().message.contains(GENTLE_INSTRUCTION));
    }

    #[tokio::test]
    async fn completion_failure_leaves_session_unchanged() {
        let mock = MockCompletionClient::new().with_error(MockError::Unavailable {
            message: "503".to_string(),
        });
        let (orchestrator, store) = orchestrator(&mock);
        let mut session = session();

        let err = orchestrator.respond(&mut session, "hello").await.unwrap_err();

        assert!(matches!(err, RespondError::CompletionUnavailable(_)));
        assert!(err.user_message().contains("try again"));
        assert!(session.history().is_empty());
        assert!(session.display_log().is_empty());
        assert_eq!(store.transcript_count().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_leaves_session_unchanged() {
        let mock = MockCompletionClient::new();
        let orchestrator = ConversationOrchestrator::new(Arc::new(mock), Arc::new(FailingStore));
        let mut session = session();

        let err = orchestrator.respond(&mut session, "hello").await.unwrap_err();

        assert!(matches!(err, RespondError::Storage(_)));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        let err = orchestrator.respond(&mut session, "   ").await.unwrap_err();
        assert!(matches!(err, RespondError::EmptyMessage));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn screening_keyword_starts_screening() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        let reply = orchestrator
            .respond(&mut session, "Can we do the Screening?")
            .await
            .unwrap();

        assert_eq!(reply.route, ResponseRoute::ScreeningStarted);
        assert!(session.screening().is_active());
        assert_eq!(session.screening().current_question(), Some(QUESTIONS[0]));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn full_screening_by_chat_scores_and_completes() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.respond(&mut session, "screening").await.unwrap();
        let mut last = None;
        for _ in 0..QUESTION_COUNT {
            last = Some(orchestrator.respond(&mut session, "3").await.unwrap());
        }

        let last = last.unwrap();
        assert_eq!(last.route, ResponseRoute::ScreeningAnswer { completed: true });
        assert_eq!(last.text, "🧠 Your anxiety level is **Severe** (Score: 21).");
        assert!(session.screening().is_completed());
        assert_eq!(mock.call_count(), 0);
        assert_eq!(session.history().len(), 2 * (QUESTION_COUNT + 1));
    }

    #[tokio::test]
    async fn crisis_words_during_screening_are_treated_as_answers() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.start_screening(&mut session).unwrap();
        let err = orchestrator
            .respond(&mut session, "I want to die")
            .await
            .unwrap_err();

        assert!(matches!(err, RespondError::Screening(ScreeningError::InvalidAnswer { .. })));
        assert_eq!(err.user_message(), "Please answer with a number from 0 to 3.");
        assert!(session.screening().is_active());
        assert_eq!(session.screening().question_index(), 0);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn completed_screening_is_not_retriggered_by_chat() {
        let mock = MockCompletionClient::new().with_response("Sure, let's talk.");
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.start_screening(&mut session).unwrap();
        for _ in 0..QUESTION_COUNT {
            orchestrator
                .submit_screening_answer(&mut session, AnswerValue::new(0).unwrap())
                .await
                .unwrap();
        }

        let reply = orchestrator
            .respond(&mut session, "can you explain my screening result?")
            .await
            .unwrap();

        assert_eq!(reply.route, ResponseRoute::Model { gentle: false });
        assert_eq!(mock.call_count(), 1);
        assert!(matches!(
            orchestrator.start_screening(&mut session),
            Err(RespondError::ScreeningAlreadyCompleted)
        ));
    }

    #[tokio::test]
    async fn start_screening_twice_is_rejected() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        orchestrator.start_screening(&mut session).unwrap();
        let err = orchestrator.start_screening(&mut session).unwrap_err();

        assert!(matches!(err, RespondError::Screening(ScreeningError::SessionAlreadyActive)));
    }

    #[tokio::test]
    async fn submitting_answer_without_screening_is_not_active() {
        let mock = MockCompletionClient::new();
        let (orchestrator, _store) = orchestrator(&mock);
        let mut session = session();

        let err = orchestrator
            .submit_screening_answer(&mut session, AnswerValue::new(1).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, RespondError::Screening(ScreeningError::NotActive)));
        assert_eq!(err.user_message(), "No screening is in progress.");
    }
}
