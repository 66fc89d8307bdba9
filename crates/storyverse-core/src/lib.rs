//! StoryVerse Core: shared domain abstractions.
//!
//! This crate defines the catalog entity model, the clock abstraction, the
//! shared error type and the traits every outbound collaborator implements.
//! It contains no infrastructure code.

pub mod catalog;
pub mod clock;
pub mod collaborator;
pub mod error;
