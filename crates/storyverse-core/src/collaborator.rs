//! Outbound collaborator contracts: neighbor suggestion and narrative
//! synthesis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntity, Medium};
use crate::error::DomainError;

/// The subset of a catalog entity handed to the synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEndpoint {
    /// Entity identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category of the entity.
    pub medium: Medium,
    /// Thematic summary.
    pub summary: String,
}

impl From<&CatalogEntity> for StoryEndpoint {
    fn from(entity: &CatalogEntity) -> Self {
        Self {
            id: entity.id.clone(),
            title: entity.title.clone(),
            medium: entity.medium,
            summary: entity.summary.clone(),
        }
    }
}

/// A ranked entity related to a bridge endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntity {
    /// Entity identifier (may be synthetic for templated suggestions).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category of the entity.
    pub medium: Medium,
    /// Why this entity is related.
    pub explanation: String,
    /// Relevance in `[0, 1]`, higher first.
    pub relevance_score: f64,
}

/// A synthesized bridging scenario between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Scenario headline.
    pub title: String,
    /// Connecting prose. Never empty.
    pub bridge: String,
    /// Ordered timeline beats.
    pub timeline_beats: Vec<String>,
    /// Continuity risk note.
    pub risk: String,
}

/// Suggests entities related to a given entity.
///
/// Implementations must return up to `limit` items and degrade to templated
/// entries rather than returning an empty list when their backing store is
/// unavailable.
#[async_trait]
pub trait NeighborService: Send + Sync {
    /// Returns ranked suggestions for `entity`.
    async fn suggest(
        &self,
        entity: &CatalogEntity,
        limit: usize,
    ) -> Result<Vec<SuggestionEntity>, DomainError>;
}

/// Produces a bridging scenario for a resolved pair.
///
/// Implementations must always produce a non-empty `bridge`, falling back to
/// deterministic templated prose without a generative backend.
#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Synthesizes a scenario connecting `source` to `target`.
    async fn synthesize(
        &self,
        source: &StoryEndpoint,
        target: &StoryEndpoint,
    ) -> Result<ScenarioRecord, DomainError>;
}
