//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for one chat session (one login, one conversation window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Email address a user registered with.
///
/// Surrounding whitespace is dropped; the rest is kept exactly as entered.
/// No syntax check is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Creates a new UserEmail, returning error if blank.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if trimmed.len() == email.len() {
            return Ok(Self(email));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the file-safe storage key for this user.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::sanitize(&self.0)
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File-safe key used to name a user's transcript.
///
/// Every character outside `[a-zA-Z0-9]` is replaced by `_`, one for one.
/// Distinct emails can therefore collide: `a.b@x.com` and `a_b@x_com` both
/// map to `a_b_x_com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Sanitizes an arbitrary string into a storage key.
    pub fn sanitize(raw: &str) -> Self {
        Self(
            raw.chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect(),
        )
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_roundtrips_through_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_email_accepts_any_non_blank_text() {
        let email = UserEmail::new("asha@example.com").unwrap();
        assert_eq!(email.as_str(), "asha@example.com");
    }

    #[test]
    fn user_email_drops_surrounding_whitespace() {
        let email = UserEmail::new("  asha@example.com\t").unwrap();
        assert_eq!(email.as_str(), "asha@example.com");
        assert_eq!(email, UserEmail::new("asha@example.com").unwrap());
    }

    #[test]
    fn user_email_rejects_blank() {
        assert_eq!(
            UserEmail::new("   "),
            Err(ValidationError::empty_field("email"))
        );
    }

    #[test]
    fn storage_key_replaces_non_alphanumerics() {
        let email = UserEmail::new("asha.k+1@example.com").unwrap();
        assert_eq!(email.storage_key().as_str(), "asha_k_1_example_com");
    }

    #[test]
    fn storage_key_replaces_non_ascii_letters() {
        assert_eq!(StorageKey::sanitize("zoë@x.in").as_str(), "zo__x_in");
    }

    #[test]
    fn storage_keys_collide_for_emails_differing_only_in_symbols() {
        let dotted = UserEmail::new("a.b@x.com").unwrap();
        let underscored = UserEmail::new("a_b@x_com").unwrap();

        assert_ne!(dotted, underscored);
        assert_eq!(dotted.storage_key(), underscored.storage_key());
        assert_eq!(dotted.storage_key().as_str(), "a_b_x_com");
    }

    proptest! {
        #[test]
        fn storage_key_is_alphanumeric_or_underscore(raw in ".{1,40}") {
            let key = StorageKey::sanitize(&raw);
            prop_assert!(key.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert_eq!(key.as_str().chars().count(), raw.chars().count());
        }
    }
}
