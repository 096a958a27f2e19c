//! Prompt text sent to, or shown beside, the language model.

use crate::domain::user::UserProfile;

/// Appended to the outgoing prompt when a message reads as emotionally low.
/// Never shown to the user or stored in the transcript.
pub const GENTLE_INSTRUCTION: &str = "[Emotionally low — respond gently]";

/// Persona and profile context, built once per session.
pub fn system_instruction(profile: &UserProfile) -> String {
    format!(
        "You are UDAY — a compassionate mental wellness AI companion.\n\
         Be supportive, warm, and human. Never diagnose. Offer grounding when needed.\n\
         \n\
         USER PROFILE:\n\
         Name: {}\n\
         Age: {}\n\
         Profession: {}\n\
         Focus: {}",
        profile.name(),
        profile.age(),
        profile.profession(),
        profile.focus()
    )
}

/// Greeting shown once when a chat opens.
pub fn welcome_message(profile: &UserProfile) -> String {
    format!(
        "Hi {}! 😊 I’m glad you're here. How are you feeling today?",
        profile.name()
    )
}

/// Adds the gentleness instruction to an outgoing message.
pub fn augment_for_low_mood(message: &str) -> String {
    format!("{} {}", message, GENTLE_INSTRUCTION)
}
