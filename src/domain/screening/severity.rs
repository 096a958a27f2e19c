//! Severity buckets for a completed screening.

use std::fmt;

/// Severity label derived from the cumulative score.
///
/// Buckets are five points wide and capped at `Severe`:
/// 0-4 Minimal, 5-9 Mild, 10-14 Moderate, 15+ Severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    const BUCKET_WIDTH: u32 = 5;
    const LEVELS: [Severity; 4] = [
        Severity::Minimal,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
    ];

    /// Maps a cumulative score onto its bucket.
    pub fn from_score(score: u32) -> Self {
        let bucket = (score / Self::BUCKET_WIDTH).min(3) as usize;
        Self::LEVELS[bucket]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
