//! Resolution engine and clarification composer.

pub mod clarification;
pub mod engine;
