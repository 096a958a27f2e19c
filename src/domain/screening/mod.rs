//! Screening module - the scripted seven-question anxiety check-in.
//!
//! # Module Organization
//!
//! - `questions` - Fixed question script, intro text and answer options
//! - `answer` - Validated answer value (0-3)
//! - `severity` - Score bucketing into severity labels
//! - `instrument` - The stateful screening instrument
//! - `errors` - Screening error types

mod answer;
mod errors;
mod instrument;
mod questions;
mod severity;

pub use answer::AnswerValue;
pub use errors::ScreeningError;
pub use instrument::{ScreeningInstrument, ScreeningOutcome, ScreeningResult, ScreeningStatus};
pub use questions::{AnswerOption, ANSWER_OPTIONS, INTRO, QUESTIONS, QUESTION_COUNT};
pub use severity::Severity;
