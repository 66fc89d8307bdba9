//! Test collaborators: mock neighbor and synthesis services.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use storyverse_core::catalog::CatalogEntity;
use storyverse_core::collaborator::{
    NeighborService, ScenarioRecord, StoryEndpoint, SuggestionEntity, SynthesisService,
};
use storyverse_core::error::DomainError;

fn echo_scenario(source: &StoryEndpoint, target: &StoryEndpoint) -> ScenarioRecord {
    ScenarioRecord {
        title: format!("{} x {}", source.title, target.title),
        bridge: format!("{} bridges into {}.", source.title, target.title),
        timeline_beats: vec!["beat".to_owned()],
        risk: "none".to_owned(),
    }
}

/// A neighbor service that echoes the entity back `limit` times and counts
/// calls.
#[derive(Debug, Default)]
pub struct EchoNeighborService {
    calls: AtomicUsize,
}

impl EchoNeighborService {
    /// Number of `suggest` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NeighborService for EchoNeighborService {
    async fn suggest(
        &self,
        entity: &CatalogEntity,
        limit: usize,
    ) -> Result<Vec<SuggestionEntity>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((1..=limit)
            .map(|n| SuggestionEntity {
                id: format!("{}-echo-{n}", entity.id),
                title: entity.title.clone(),
                medium: entity.medium,
                explanation: "echo".to_owned(),
                relevance_score: 1.0,
            })
            .collect())
    }
}

/// A neighbor service that always fails and counts calls.
#[derive(Debug, Default)]
pub struct FailingNeighborService {
    calls: AtomicUsize,
}

impl FailingNeighborService {
    /// Number of `suggest` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NeighborService for FailingNeighborService {
    async fn suggest(
        &self,
        _entity: &CatalogEntity,
        _limit: usize,
    ) -> Result<Vec<SuggestionEntity>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Collaborator {
            service: "neighbor",
            message: "graph backend unavailable at 10.0.0.7".into(),
        })
    }
}

/// A synthesis service that returns a scenario derived from the titles and
/// counts calls.
#[derive(Debug, Default)]
pub struct EchoSynthesisService {
    calls: AtomicUsize,
}

impl EchoSynthesisService {
    /// Number of `synthesize` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisService for EchoSynthesisService {
    async fn synthesize(
        &self,
        source: &StoryEndpoint,
        target: &StoryEndpoint,
    ) -> Result<ScenarioRecord, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(echo_scenario(source, target))
    }
}

/// A synthesis service that fails for the first `failures` calls and
/// succeeds afterwards.
#[derive(Debug)]
pub struct FlakySynthesisService {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakySynthesisService {
    /// Create a service that fails `failures` times before succeeding.
    #[must_use]
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `synthesize` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisService for FlakySynthesisService {
    async fn synthesize(
        &self,
        source: &StoryEndpoint,
        target: &StoryEndpoint,
    ) -> Result<ScenarioRecord, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(DomainError::Collaborator {
                service: "synthesis",
                message: format!("model endpoint returned 503 on call {}", call + 1),
            });
        }
        Ok(echo_scenario(source, target))
    }
}

/// A synthesis service whose calls never complete. Counts calls.
#[derive(Debug, Default)]
pub struct PendingSynthesisService {
    calls: AtomicUsize,
}

impl PendingSynthesisService {
    /// Number of `synthesize` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisService for PendingSynthesisService {
    async fn synthesize(
        &self,
        _source: &StoryEndpoint,
        _target: &StoryEndpoint,
    ) -> Result<ScenarioRecord, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}
