//! Deterministic narrative synthesis.

use async_trait::async_trait;
use storyverse_core::collaborator::{ScenarioRecord, StoryEndpoint, SynthesisService};
use storyverse_core::error::DomainError;

const CONTINUITY_RISK: &str = "Continuity drift may destabilize canonical timelines if unresolved.";

/// The built-in synthesis service. Produces a templated "what if" scenario
/// for any pair without calling a generative backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorytellerService;

impl StorytellerService {
    /// Builds the scenario for `source` and `target`.
    #[must_use]
    pub fn compose(source: &StoryEndpoint, target: &StoryEndpoint) -> ScenarioRecord {
        let (a, b) = (&source.title, &target.title);
        ScenarioRecord {
            title: format!("What If {a} Met {b}?"),
            bridge: format!(
                "A relic from {a} is discovered in {b}, forcing both worlds into a shared conflict economy."
            ),
            timeline_beats: vec![
                format!("Inciting Event: a narrative signal links {a} to {b}."),
                "Escalation: both worlds reinterpret the signal as an existential threat.".to_owned(),
                "Convergence: protagonists negotiate an uneasy alliance.".to_owned(),
                "Resolution: one shared myth survives and redefines both canons.".to_owned(),
            ],
            risk: CONTINUITY_RISK.to_owned(),
        }
    }
}

#[async_trait]
impl SynthesisService for StorytellerService {
    async fn synthesize(
        &self,
        source: &StoryEndpoint,
        target: &StoryEndpoint,
    ) -> Result<ScenarioRecord, DomainError> {
        Ok(Self::compose(source, target))
    }
}
