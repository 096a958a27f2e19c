//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Add the gentle-tone note to low-mood messages
    #[serde(default = "default_enable_sentiment_gate")]
    pub enable_sentiment_gate: bool,

    /// Let a running screening be restarted from the top
    #[serde(default)]
    pub allow_screening_restart: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_sentiment_gate: default_enable_sentiment_gate(),
            allow_screening_restart: false,
        }
    }
}

fn default_enable_sentiment_gate() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.enable_sentiment_gate);
        assert!(!flags.allow_screening_restart);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"allow_screening_restart": true}"#).unwrap();
        assert!(flags.enable_sentiment_gate);
        assert!(flags.allow_screening_restart);

        let flags: FeatureFlags = serde_json::from_str(r#"{"enable_sentiment_gate": false}"#).unwrap();
        assert!(!flags.enable_sentiment_gate);
    }
}
