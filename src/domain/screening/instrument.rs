//! Screening instrument - the stateful seven-question pass.
//!
//! # State machine
//!
//! ```text
//! Idle ──start──▶ Active ──7th answer──▶ Completed
//!                  ▲  │                      │
//!                  └──┘ restart (opt-in)     │
//!                  ▲                         │
//!                  └─────────start───────────┘
//! ```
//!
//! `Active` and `Completed` are variants of one enum, so they can never both
//! hold. The question index moves by exactly one per accepted answer and
//! never passes [`QUESTION_COUNT`].

use super::questions::{INTRO, QUESTIONS, QUESTION_COUNT};
use super::{AnswerValue, ScreeningError, Severity};
use crate::domain::foundation::StateMachine;

/// Lifecycle of one screening pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreeningStatus {
    #[default]
    Idle,
    Active,
    Completed,
}

impl StateMachine for ScreeningStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ScreeningStatus::*;
        matches!(
            (self, target),
            (Idle, Active) | (Active, Active) | (Active, Completed) | (Completed, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ScreeningStatus::*;
        match self {
            Idle => vec![Active],
            Active => vec![Active, Completed],
            Completed => vec![Active],
        }
    }
}

/// Final score of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningResult {
    pub score: u32,
    pub severity: Severity,
}

impl ScreeningResult {
    fn from_score(score: u32) -> Self {
        Self {
            score,
            severity: Severity::from_score(score),
        }
    }

    /// Summary shown to the user.
    pub fn summary(&self) -> String {
        format!(
            "🧠 Your anxiety level is **{}** (Score: {}).",
            self.severity, self.score
        )
    }
}

/// What happened after an answer was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreeningOutcome {
    /// More questions remain; this is the next one.
    NextQuestion(&'static str),
    /// The final answer was recorded.
    Completed(ScreeningResult),
}

impl ScreeningOutcome {
    /// Text to show the user for this step.
    pub fn message(&self) -> String {
        match self {
            ScreeningOutcome::NextQuestion(question) => (*question).to_string(),
            ScreeningOutcome::Completed(result) => result.summary(),
        }
    }
}

/// Fixed-script anxiety screening.
#[derive(Debug, Clone, Default)]
pub struct ScreeningInstrument {
    status: ScreeningStatus,
    question_index: usize,
    score: u32,
    allow_restart: bool,
}

impl ScreeningInstrument {
    /// Creates an idle instrument that refuses to restart mid-pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `start` to silently reset a pass that is still running.
    pub fn with_restart_allowed(mut self, allow: bool) -> Self {
        self.allow_restart = allow;
        self
    }

    /// Begins a fresh pass and returns the intro text.
    ///
    /// The first question is not part of the returned text; read it with
    /// [`current_question`](Self::current_question).
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyActive` if a pass is running and restarts are not allowed
    pub fn start(&mut self) -> Result<&'static str, ScreeningError> {
        if self.status == ScreeningStatus::Active && !self.allow_restart {
            return Err(ScreeningError::SessionAlreadyActive);
        }

        self.status = self
            .status
            .transition_to(ScreeningStatus::Active)
            .map_err(|_| ScreeningError::SessionAlreadyActive)?;
        self.question_index = 0;
        self.score = 0;
        Ok(INTRO)
    }

    /// Records one answer and advances.
    ///
    /// # Errors
    ///
    /// - `NotActive` if no pass is running (including an 8th answer)
    pub fn process(&mut self, answer: AnswerValue) -> Result<ScreeningOutcome, ScreeningError> {
        if self.status != ScreeningStatus::Active {
            return Err(ScreeningError::NotActive);
        }

        self.score += u32::from(answer.value());
        self.question_index += 1;

        if self.question_index < QUESTION_COUNT {
            return Ok(ScreeningOutcome::NextQuestion(QUESTIONS[self.question_index]));
        }

        self.status = ScreeningStatus::Completed;
        Ok(ScreeningOutcome::Completed(ScreeningResult::from_score(
            self.score,
        )))
    }

    pub fn status(&self) -> ScreeningStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ScreeningStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == ScreeningStatus::Completed
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The question awaiting an answer, while a pass is running.
    pub fn current_question(&self) -> Option<&'static str> {
        self.is_active().then(|| QUESTIONS[self.question_index])
    }

    /// One-based number of the current question, for "Question 3 of 7" headings.
    pub fn question_number(&self) -> Option<usize> {
        self.is_active().then_some(self.question_index + 1)
    }

    /// Result of the last completed pass.
    pub fn result(&self) -> Option<ScreeningResult> {
        self.is_completed()
            .then(|| ScreeningResult::from_score(self.score))
    }
}
