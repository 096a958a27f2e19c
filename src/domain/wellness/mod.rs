//! Wellness module - safety and mood signals read from a single message.
//!
//! - `crisis` - Self-harm / crisis keyword interception
//! - `sentiment` - VADER polarity scoring and the low-mood gate

mod crisis;
mod sentiment;

pub use crisis::{CrisisDetector, CRISIS_KEYWORDS, CRISIS_RESPONSE};
pub use sentiment::{PolarityScores, SentimentAnalyzer, SentimentGate, LOW_MOOD_THRESHOLD};
