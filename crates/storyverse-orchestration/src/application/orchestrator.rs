//! Fans a resolved pair out to both collaborators and joins the results.

use std::sync::Arc;

use storyverse_core::catalog::CatalogEntity;
use storyverse_core::collaborator::{NeighborService, StoryEndpoint, SynthesisService};
use storyverse_core::error::DomainError;
use storyverse_resolution::ResolutionMetadata;

use crate::domain::outcome::OrchestrationOutcome;

/// Number of neighbor suggestions requested for a pair.
pub const SUGGESTION_LIMIT: usize = 4;

/// Runs neighbor suggestion and narrative synthesis concurrently.
#[derive(Clone)]
pub struct Orchestrator {
    neighbors: Arc<dyn NeighborService>,
    synthesis: Arc<dyn SynthesisService>,
}

impl Orchestrator {
    /// Creates an orchestrator over the given collaborators.
    #[must_use]
    pub fn new(neighbors: Arc<dyn NeighborService>, synthesis: Arc<dyn SynthesisService>) -> Self {
        Self {
            neighbors,
            synthesis,
        }
    }

    /// Produces the outcome for a resolved pair.
    ///
    /// Both collaborator calls run concurrently. The first failure ends the
    /// run and the other branch is dropped; no partial outcome is built.
    ///
    /// # Errors
    ///
    /// Returns the first `DomainError` raised by either collaborator.
    pub async fn run(
        &self,
        query: &str,
        source: &CatalogEntity,
        target: &CatalogEntity,
        resolution: &ResolutionMetadata,
    ) -> Result<OrchestrationOutcome, DomainError> {
        let source_endpoint = StoryEndpoint::from(source);
        let target_endpoint = StoryEndpoint::from(target);

        let (suggestions, scenario) = tokio::try_join!(
            self.neighbors.suggest(source, SUGGESTION_LIMIT),
            self.synthesis.synthesize(&source_endpoint, &target_endpoint),
        )?;

        Ok(OrchestrationOutcome {
            query: query.to_owned(),
            source: source.clone(),
            target: target.clone(),
            resolution: resolution.clone(),
            suggestions,
            scenario,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storyverse_catalog::seed_catalog;
    use storyverse_resolution::resolve_manual;
    use storyverse_test_support::{
        EchoNeighborService, EchoSynthesisService, FailingNeighborService, PendingSynthesisService,
    };

    use super::*;

    #[tokio::test]
    async fn test_run_joins_both_collaborators() {
        // Arrange
        let catalog = seed_catalog();
        let neighbors = Arc::new(EchoNeighborService::default());
        let synthesis = Arc::new(EchoSynthesisService::default());
        let orchestrator = Orchestrator::new(neighbors.clone(), synthesis.clone());
        let resolved = resolve_manual("Connect Dune to Cleopatra.", &catalog[4], &catalog[2]);

        // Act
        let outcome = orchestrator
            .run(
                "Connect Dune to Cleopatra.",
                &resolved.source,
                &resolved.target,
                &resolved.metadata,
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.query, "Connect Dune to Cleopatra.");
        assert_eq!(outcome.suggestions.len(), SUGGESTION_LIMIT);
        assert_eq!(outcome.suggestions[0].id, "dune-echo-1");
        assert_eq!(outcome.scenario.bridge, "Dune bridges into Cleopatra.");
        assert_eq!(outcome.resolution, resolved.metadata);
        assert_eq!(neighbors.calls(), 1);
        assert_eq!(synthesis.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_branch_fails_the_whole_run() {
        // Arrange
        let catalog = seed_catalog();
        let orchestrator = Orchestrator::new(
            Arc::new(FailingNeighborService::default()),
            Arc::new(PendingSynthesisService::default()),
        );
        let resolved = resolve_manual("q", &catalog[0], &catalog[1]);

        // Act
        let result = orchestrator
            .run("q", &resolved.source, &resolved.target, &resolved.metadata)
            .await;

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::Collaborator {
                service: "neighbor",
                ..
            })
        ));
    }
}
