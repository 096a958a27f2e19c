//! Crisis detector.
//!
//! A message mentioning self-harm must never reach the language model. The
//! detector lower-cases the text and looks for any keyword as a plain
//! substring, so "Cutting" and "I've been cutting again" both match.

/// Phrases that trigger the crisis response.
pub const CRISIS_KEYWORDS: [&str; 8] = [
    "suicide",
    "kill myself",
    "want to die",
    "end my life",
    "self harm",
    "hurt myself",
    "cutting",
    "no reason to live",
];

/// Fixed supportive reply with helpline contacts.
pub const CRISIS_RESPONSE: &str = "💙 I’m really sorry you’re feeling this way.\n\
You're not alone. Please reach out for support immediately:\n\n\
📞 KIRAN Helpline (India): 1800-599-0019\n\
📞 iCALL: 022-25521111\n\n\
You matter. 💙";

/// Scans messages for crisis language.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: &'static [&'static str],
    response: &'static str,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisDetector {
    pub fn new() -> Self {
        Self {
            keywords: &CRISIS_KEYWORDS,
            response: CRISIS_RESPONSE,
        }
    }

    /// Returns the crisis response if the message contains any keyword.
    pub fn check(&self, message: &str) -> Option<&'static str> {
        self.matched_keyword(message).map(|_| self.response)
    }

    /// Returns the first keyword found in the message.
    pub fn matched_keyword(&self, message: &str) -> Option<&'static str> {
        let lowered = message.to_lowercase();
        self.keywords
            .iter()
            .copied()
            .find(|keyword| lowered.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_keyword_triggers_the_response() {
        let detector = CrisisDetector::new();
        for keyword in CRISIS_KEYWORDS {
            let message = format!("lately I {} sometimes", keyword);
            assert_eq!(detector.check(&message), Some(CRISIS_RESPONSE), "{}", keyword);
        }
    }

    #[test]
    fn matching_ignores_case() {
        let detector = CrisisDetector::new();
        assert_eq!(detector.check("I WANT TO DIE"), Some(CRISIS_RESPONSE));
        assert_eq!(detector.matched_keyword("Thinking about Suicide"), Some("suicide"));
    }

    #[test]
    fn matching_is_substring_based() {
        let detector = CrisisDetector::new();
        // "cutting" inside an unrelated phrase still trips the detector.
        assert_eq!(detector.matched_keyword("I was cutting vegetables"), Some("cutting"));
    }

    #[test]
    fn ordinary_messages_pass_through() {
        let detector = CrisisDetector::new();
        assert_eq!(detector.check("I had a long day at work"), None);
        assert_eq!(detector.check(""), None);
    }

    #[test]
    fn response_lists_helplines() {
        assert!(CRISIS_RESPONSE.contains("1800-599-0019"));
        assert!(CRISIS_RESPONSE.contains("022-25521111"));
    }

    proptest! {
        #[test]
        fn keyword_anywhere_in_text_is_detected(
            prefix in "[a-zA-Z ]{0,20}",
            suffix in "[a-zA-Z ]{0,20}",
            index in 0usize..CRISIS_KEYWORDS.len(),
        ) {
            let message = format!("{}{}{}", prefix, CRISIS_KEYWORDS[index].to_uppercase(), suffix);
            prop_assert_eq!(CrisisDetector::new().check(&message), Some(CRISIS_RESPONSE));
        }
    }
}
