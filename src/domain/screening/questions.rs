//! Fixed screening script.

/// Number of questions in one screening pass.
pub const QUESTION_COUNT: usize = 7;

/// Shown when a screening pass begins.
pub const INTRO: &str = "🧠 Let's begin a short screening check-in.";

/// The questions, in the order they are asked.
pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "In the last 2 weeks, how often have you been anxious or on edge?",
    "How often have you been unable to control worrying?",
    "How often have you been worrying too much about different things?",
    "How often have you had trouble relaxing?",
    "How often have you been restless or unable to sit still?",
    "How often have you become easily irritable?",
    "How often have you felt afraid as if something awful might happen?",
];

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

impl AnswerOption {
    /// "2 - More than half the days"
    pub fn display(&self) -> String {
        format!("{} - {}", self.value, self.label)
    }
}

/// The four answers every question accepts.
pub const ANSWER_OPTIONS: [AnswerOption; 4] = [
    AnswerOption { value: 0, label: "Not at all" },
    AnswerOption { value: 1, label: "Several days" },
    AnswerOption { value: 2, label: "More than half the days" },
    AnswerOption { value: 3, label: "Nearly every day" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_has_seven_distinct_questions() {
        assert_eq!(QUESTIONS.len(), 7);
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert!(!QUESTIONS[i + 1..].contains(q));
        }
    }

    #[test]
    fn answer_options_cover_zero_to_three() {
        let values: Vec<u8> = ANSWER_OPTIONS.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
        assert_eq!(ANSWER_OPTIONS[3].display(), "3 - Nearly every day");
    }
}
