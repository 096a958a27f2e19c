//! Domain layer containing the companion's business rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors, state machine)
//! - `user` - Registration profile
//! - `conversation` - Turns, prompts and the per-user chat session
//! - `screening` - The seven-question anxiety screening instrument
//! - `wellness` - Crisis detection and sentiment gating

pub mod conversation;
pub mod foundation;
pub mod screening;
pub mod user;
pub mod wellness;
