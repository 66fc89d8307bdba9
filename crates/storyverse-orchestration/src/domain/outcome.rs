//! The assembled result of one orchestration run.

use serde::Serialize;
use storyverse_core::catalog::CatalogEntity;
use storyverse_core::collaborator::{ScenarioRecord, SuggestionEntity};
use storyverse_resolution::ResolutionMetadata;

/// Everything produced for one resolved pair. Only ever built once both
/// collaborators have succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationOutcome {
    /// The query text the run was made for.
    pub query: String,
    pub source: CatalogEntity,
    pub target: CatalogEntity,
    /// How the pair was resolved.
    pub resolution: ResolutionMetadata,
    /// Entities related to the source, strongest first.
    pub suggestions: Vec<SuggestionEntity>,
    pub scenario: ScenarioRecord,
}
