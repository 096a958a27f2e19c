//! User module - registration profile of the person using the companion.

mod profile;

pub use profile::{FocusArea, Profession, UserProfile};
