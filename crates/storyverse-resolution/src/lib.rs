//! StoryVerse Query Resolution: free text to an entity pair.
//!
//! Turns ambiguous English or Korean input into a confident
//! (source, target) catalog pair, with confidence, candidate rankings and
//! localized clarification text. Everything here is pure and synchronous.

pub mod application;
pub mod domain;

pub use application::clarification::{
    ClarificationChoice, DEFAULT_MAX_CHOICES, build_choices, connect_prompt,
};
pub use application::engine::{resolve_manual, resolve_query};
pub use domain::model::{
    Confidence, Locale, RankedCandidate, ResolutionError, ResolutionMetadata, ResolutionOptions,
    ResolutionResult, ResolutionStrategy,
};
