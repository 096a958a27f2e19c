//! User profile captured at registration.
//!
//! The profile is immutable once created. It feeds the system instruction
//! that personalises every model reply, and the welcome greeting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// What the user does for a living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Student,
    Corporate,
    Worker,
    Homemaker,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Other,
}

impl Profession {
    /// All options, in the order a registration form offers them.
    pub const ALL: [Profession; 6] = [
        Profession::Student,
        Profession::Corporate,
        Profession::Worker,
        Profession::Homemaker,
        Profession::SelfEmployed,
        Profession::Other,
    ];

    /// Human-readable label, identical to the stored form.
    pub fn label(&self) -> &'static str {
        match self {
            Profession::Student => "Student",
            Profession::Corporate => "Corporate",
            Profession::Worker => "Worker",
            Profession::Homemaker => "Homemaker",
            Profession::SelfEmployed => "Self-employed",
            Profession::Other => "Other",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Profession {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &Self::ALL, Self::label, "profession")
    }
}

/// The area the user most wants support with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusArea {
    Anxiety,
    #[serde(rename = "Work Stress")]
    WorkStress,
    Depression,
    #[serde(rename = "Self-esteem")]
    SelfEsteem,
    Relationships,
    Overthinking,
}

impl FocusArea {
    /// All options, in the order a registration form offers them.
    pub const ALL: [FocusArea; 6] = [
        FocusArea::Anxiety,
        FocusArea::WorkStress,
        FocusArea::Depression,
        FocusArea::SelfEsteem,
        FocusArea::Relationships,
        FocusArea::Overthinking,
    ];

    /// Human-readable label, identical to the stored form.
    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Anxiety => "Anxiety",
            FocusArea::WorkStress => "Work Stress",
            FocusArea::Depression => "Depression",
            FocusArea::SelfEsteem => "Self-esteem",
            FocusArea::Relationships => "Relationships",
            FocusArea::Overthinking => "Overthinking",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FocusArea {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &Self::ALL, Self::label, "focus")
    }
}

fn parse_label<T: Copy>(
    raw: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
    field: &str,
) -> Result<T, ValidationError> {
    let wanted = raw.trim();
    options
        .iter()
        .find(|option| label(option).eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| ValidationError::invalid_format(field, format!("unknown option '{}'", wanted)))
}

/// Registration details for one user.
///
/// # Invariants
///
/// - `name` is non-empty
/// - fields never change after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    name: String,
    /// Free text, as entered ("24", "mid-thirties").
    age: String,
    profession: Profession,
    focus: FocusArea,
}

impl UserProfile {
    /// Creates a new profile.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        profession: Profession,
        focus: FocusArea,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            name,
            age: age.into().trim().to_string(),
            profession,
            focus,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    pub fn focus(&self) -> FocusArea {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile::new("Meera", "29", Profession::SelfEmployed, FocusArea::WorkStress).unwrap()
    }

    #[test]
    fn profile_requires_a_name() {
        let result = UserProfile::new("  ", "29", Profession::Student, FocusArea::Anxiety);
        assert_eq!(result, Err(ValidationError::empty_field("name")));
    }

    #[test]
    fn profile_trims_inputs() {
        let profile =
            UserProfile::new(" Meera ", " 29 ", Profession::Student, FocusArea::Anxiety).unwrap();
        assert_eq!(profile.name(), "Meera");
        assert_eq!(profile.age(), "29");
    }

    #[test]
    fn profile_serializes_with_display_labels() {
        let json = serde_json::to_value(sample_profile()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Meera",
                "age": "29",
                "profession": "Self-employed",
                "focus": "Work Stress"
            })
        );
    }

    #[test]
    fn profile_deserializes_stored_record() {
        let json = r#"{"name":"Ravi","age":"41","profession":"Homemaker","focus":"Self-esteem"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.profession(), Profession::Homemaker);
        assert_eq!(profile.focus(), FocusArea::SelfEsteem);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("self-employed".parse::<Profession>(), Ok(Profession::SelfEmployed));
        assert_eq!("WORK STRESS".parse::<FocusArea>(), Ok(FocusArea::WorkStress));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Astronaut".parse::<Profession>().unwrap_err();
        assert!(err.to_string().contains("unknown option 'Astronaut'"));
    }

    #[test]
    fn every_label_roundtrips_through_from_str() {
        for profession in Profession::ALL {
            assert_eq!(profession.label().parse::<Profession>(), Ok(profession));
        }
        for focus in FocusArea::ALL {
            assert_eq!(focus.label().parse::<FocusArea>(), Ok(focus));
        }
    }
}
