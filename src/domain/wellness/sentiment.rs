//! Sentiment analysis and the low-mood gate.
//!
//! Scoring is VADER: the full social-media valence lexicon with negation,
//! booster words, contrastive "but", ALL-CAPS and punctuation emphasis. The
//! summed valence is squashed into a compound score in `[-1, 1]`.

use once_cell::sync::Lazy;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound score below which a message counts as emotionally low.
pub const LOW_MOOD_THRESHOLD: f64 = -0.4;

static VADER: Lazy<SentimentIntensityAnalyzer<'static>> = Lazy::new(SentimentIntensityAnalyzer::new);

/// Proportions of positive, negative and neutral content plus the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// Lexicon and rule based polarity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scores a message.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let scores = VADER.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().unwrap_or_default();

        PolarityScores {
            neg: score("neg"),
            neu: score("neu"),
            pos: score("pos"),
            compound: score("compound"),
        }
    }
}

/// Decides whether a message reads as emotionally low.
#[derive(Debug, Clone, Copy)]
pub struct SentimentGate {
    analyzer: SentimentAnalyzer,
    threshold: f64,
}

impl Default for SentimentGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentGate {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
            threshold: LOW_MOOD_THRESHOLD,
        }
    }

    /// Overrides the compound threshold (default `-0.4`).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Compound polarity of the message.
    pub fn compound(&self, message: &str) -> f64 {
        self.analyzer.polarity_scores(message).compound
    }

    /// True when the compound score falls strictly below the threshold.
    pub fn is_emotionally_low(&self, message: &str) -> bool {
        self.compound(message) < self.threshold
    }
}
