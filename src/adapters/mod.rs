//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Completion clients (Gemini, mock)
//! - `storage` - Transcript and user registry persistence

pub mod ai;
pub mod storage;
