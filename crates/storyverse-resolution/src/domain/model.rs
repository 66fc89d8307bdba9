//! Value types produced by query resolution.

use serde::{Deserialize, Serialize};
use storyverse_core::catalog::{CatalogEntity, Medium};
use thiserror::Error;

use super::normalize::contains_hangul;

/// Default score gap at or below which two top candidates count as tied.
pub const DEFAULT_AMBIGUITY_MARGIN: u32 = 15;
/// Smallest accepted ambiguity margin.
pub const MIN_AMBIGUITY_MARGIN: u32 = 1;
/// Largest accepted ambiguity margin.
pub const MAX_AMBIGUITY_MARGIN: u32 = 40;

/// The path used to derive a pair from a query, in evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// The caller supplied two catalog ids directly.
    ManualSelection,
    /// A syntactic pattern yielded two fragments.
    ExplicitPair,
    /// No pattern matched but the query mentions two or more entities.
    MentionPair,
    /// Exactly one entity was mentioned.
    SingleMentionFallback,
    /// Nothing matched.
    DefaultFallback,
}

/// How much the resolved pair can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Language of the query. Governs clarification wording only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ko,
}

impl Locale {
    /// A query containing any Hangul syllable is Korean; anything else is
    /// English.
    #[must_use]
    pub fn detect(query: &str) -> Self {
        if contains_hangul(query) {
            Self::Ko
        } else {
            Self::En
        }
    }
}

/// A scored candidate for one side of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// Catalog id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Match score, including any medium bonus.
    pub score: u32,
}

impl RankedCandidate {
    /// Builds a candidate for `entity` with the given score.
    #[must_use]
    pub fn of(entity: &CatalogEntity, score: u32) -> Self {
        Self {
            id: entity.id.clone(),
            title: entity.title.clone(),
            score,
        }
    }
}

/// Tunables threaded explicitly into every resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Media to favour, strongest first. Empty means no preference.
    pub preferred_medium_order: Vec<Medium>,
    /// Score gap treated as a tie between the top two candidates.
    pub ambiguity_margin: u32,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            preferred_medium_order: Vec::new(),
            ambiguity_margin: DEFAULT_AMBIGUITY_MARGIN,
        }
    }
}

impl ResolutionOptions {
    /// Replaces the preferred medium order.
    #[must_use]
    pub fn with_preferred_medium_order(mut self, order: Vec<Medium>) -> Self {
        self.preferred_medium_order = order;
        self
    }

    /// Sets the ambiguity margin. Values outside
    /// `MIN_AMBIGUITY_MARGIN..=MAX_AMBIGUITY_MARGIN` are ignored.
    #[must_use]
    pub fn with_ambiguity_margin(mut self, margin: u32) -> Self {
        if (MIN_AMBIGUITY_MARGIN..=MAX_AMBIGUITY_MARGIN).contains(&margin) {
            self.ambiguity_margin = margin;
        }
        self
    }
}

/// Everything a resolution decided except the pair itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionMetadata {
    pub strategy: ResolutionStrategy,
    pub confidence: Confidence,
    pub locale: Locale,
    /// True whenever confidence is low or either side was ambiguous.
    pub needs_clarification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_prompt: Option<String>,
    pub source_candidates: Vec<RankedCandidate>,
    pub target_candidates: Vec<RankedCandidate>,
}

/// A resolved (source, target) pair. `source.id != target.id` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub source: CatalogEntity,
    pub target: CatalogEntity,
    #[serde(flatten)]
    pub metadata: ResolutionMetadata,
}

/// Resolution failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// Fewer than two distinct entities are available, so no valid pair
    /// exists.
    #[error("catalog must contain at least two distinct entities, found {size}")]
    CatalogTooSmall {
        /// Number of distinct ids in the catalog.
        size: usize,
    },
}
