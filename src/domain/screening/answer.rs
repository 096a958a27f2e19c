//! Validated screening answer.

use std::fmt;
use std::str::FromStr;

use super::ScreeningError;

/// How often a symptom occurred: 0 (not at all) to 3 (nearly every day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub const MAX: u8 = 3;

    /// Creates an answer, rejecting anything above 3.
    pub fn new(value: u8) -> Result<Self, ScreeningError> {
        if value > Self::MAX {
            return Err(ScreeningError::invalid_answer(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses typed answers.
///
/// Accepts a bare digit ("2") or an option label that starts with one
/// ("2 - More than half the days"); only the first token is read.
impl FromStr for AnswerValue {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.split_whitespace().next().unwrap_or("");
        token
            .parse::<u8>()
            .map_err(|_| ScreeningError::invalid_answer(s.trim()))
            .and_then(|value| {
                Self::new(value).map_err(|_| ScreeningError::invalid_answer(s.trim()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_through_three() {
        for v in 0..=3 {
            assert_eq!(AnswerValue::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn rejects_values_above_three() {
        assert_eq!(AnswerValue::new(4), Err(ScreeningError::invalid_answer("4")));
    }

    #[test]
    fn parses_bare_digit_and_option_label() {
        assert_eq!("1".parse::<AnswerValue>().unwrap().value(), 1);
        assert_eq!(
            "2 - More than half the days".parse::<AnswerValue>().unwrap().value(),
            2
        );
        assert_eq!("  3  ".parse::<AnswerValue>().unwrap().value(), 3);
    }

    #[test]
    fn rejects_free_text_negative_and_empty_input() {
        for raw in ["I want to die", "-1", "", "7", "2.5"] {
            assert!(
                matches!(raw.parse::<AnswerValue>(), Err(ScreeningError::InvalidAnswer { .. })),
                "expected {:?} to be rejected",
                raw
            );
        }
    }
}
