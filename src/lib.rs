//! UDAY - Mental Wellness Companion
//!
//! A conversational assistant that wraps a hosted language model with a
//! crisis-language interceptor, a scripted anxiety screening, a low-mood
//! sentiment gate and per-user transcript persistence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
