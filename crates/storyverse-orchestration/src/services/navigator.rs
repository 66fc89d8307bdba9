//! Neighbor suggestions from the catalog relation graph, with templated
//! fallbacks when the graph has nothing to offer.

use std::sync::Arc;

use async_trait::async_trait;
use storyverse_core::catalog::{CatalogEntity, RelatedEntitySource};
use storyverse_core::collaborator::{NeighborService, SuggestionEntity};
use storyverse_core::error::DomainError;
use tracing::warn;

const FALLBACK_EXPLANATIONS: [&str; 4] = [
    "Shared archetype and narrative stakes.",
    "Common setting dynamics with different genre expression.",
    "Parallel moral conflict with divergent outcomes.",
    "Bridgeable through a recurring thematic motif.",
];
const GRAPH_EXPLANATION: &str = "Related through graph proximity.";
const FALLBACK_SCORE_STEP: f64 = 0.15;
const FALLBACK_SCORE_FLOOR: f64 = 0.1;

/// The built-in neighbor service.
///
/// Reads related entities from an optional graph source. When the source
/// is absent, empty or failing, it returns `limit` templated variants of the
/// entity instead, so callers always get suggestions.
#[derive(Clone, Default)]
pub struct NavigatorService {
    graph: Option<Arc<dyn RelatedEntitySource>>,
}

impl NavigatorService {
    /// Creates a navigator backed by `graph`.
    #[must_use]
    pub fn new(graph: Arc<dyn RelatedEntitySource>) -> Self {
        Self { graph: Some(graph) }
    }

    /// Creates a navigator that only produces templated suggestions.
    #[must_use]
    pub fn templated() -> Self {
        Self::default()
    }

    async fn graph_neighbors(&self, entity: &CatalogEntity, limit: usize) -> Vec<SuggestionEntity> {
        let Some(graph) = &self.graph else {
            return Vec::new();
        };
        match graph.related(&entity.id, limit).await {
            Ok(related) => related
                .into_iter()
                .take(limit)
                .map(|edge| {
                    let explanation = if edge.entity.summary.is_empty() {
                        GRAPH_EXPLANATION.to_owned()
                    } else {
                        edge.entity.summary
                    };
                    SuggestionEntity {
                        id: edge.entity.id,
                        title: edge.entity.title,
                        medium: edge.entity.medium,
                        explanation,
                        relevance_score: edge.rank,
                    }
                })
                .collect(),
            Err(error) => {
                warn!(entity_id = %entity.id, error = %error, "graph neighbors unavailable; using templates");
                Vec::new()
            }
        }
    }
}

/// `limit` templated variants of `entity` with decreasing relevance.
fn fallback_suggestions(entity: &CatalogEntity, limit: usize) -> Vec<SuggestionEntity> {
    (1..=u32::try_from(limit).unwrap_or(u32::MAX))
        .zip(FALLBACK_EXPLANATIONS.iter().cycle())
        .map(|(n, explanation)| SuggestionEntity {
            id: format!("{}-fallback-{n}", entity.id),
            title: format!("{} :: Variant {n}", entity.title),
            medium: entity.medium,
            explanation: (*explanation).to_owned(),
            relevance_score: (1.0 - f64::from(n - 1) * FALLBACK_SCORE_STEP)
                .max(FALLBACK_SCORE_FLOOR),
        })
        .collect()
}

#[async_trait]
impl NeighborService for NavigatorService {
    async fn suggest(
        &self,
        entity: &CatalogEntity,
        limit: usize,
    ) -> Result<Vec<SuggestionEntity>, DomainError> {
        let neighbors = self.graph_neighbors(entity, limit).await;
        if neighbors.is_empty() {
            return Ok(fallback_suggestions(entity, limit));
        }
        Ok(neighbors)
    }
}
