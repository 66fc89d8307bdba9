//! Universe commands: resolve free text or an explicit pair and run the
//! bridge orchestration for it.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use storyverse_orchestration::OrchestrationOutcome;
use storyverse_resolution::{ClarificationChoice, DEFAULT_MAX_CHOICES, build_choices};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /resolve.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Free-text command in English or Korean.
    pub query: String,
}

/// Request body for POST /pair.
#[derive(Debug, Deserialize)]
pub struct PairRequest {
    pub source_id: String,
    pub target_id: String,
    /// Optional query text; defaults to a connect phrasing of both titles.
    pub query: Option<String>,
}

/// Response body for both commands.
#[derive(Debug, Serialize)]
pub struct UniverseResponse {
    #[serde(flatten)]
    pub outcome: OrchestrationOutcome,
    /// Alternative pairs, present only when the resolution needs
    /// clarification.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clarification_choices: Vec<ClarificationChoice>,
}

impl From<OrchestrationOutcome> for UniverseResponse {
    fn from(outcome: OrchestrationOutcome) -> Self {
        let resolution = &outcome.resolution;
        // A pair that names one entity twice would be rejected by /pair.
        let clarification_choices = if resolution.needs_clarification {
            build_choices(
                resolution.locale,
                &resolution.source_candidates,
                &resolution.target_candidates,
                (outcome.source.id.as_str(), outcome.target.id.as_str()),
                usize::MAX,
            )
            .into_iter()
            .filter(|choice| choice.source_id != choice.target_id)
            .take(DEFAULT_MAX_CHOICES)
            .collect()
        } else {
            Vec::new()
        };
        Self {
            outcome,
            clarification_choices,
        }
    }
}

/// POST /resolve
#[instrument(skip(state, request))]
async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<UniverseResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "handling resolve command");

    let outcome = state.actions.resolve_and_run(&request.query).await?;

    Ok(Json(outcome.into()))
}

/// POST /pair
#[instrument(skip(state, request), fields(source_id = %request.source_id, target_id = %request.target_id))]
async fn pair(
    State(state): State<AppState>,
    Json(request): Json<PairRequest>,
) -> Result<Json<UniverseResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "handling pair command");

    let outcome = state
        .actions
        .run_with_pair(
            &request.source_id,
            &request.target_id,
            request.query.as_deref(),
        )
        .await?;

    Ok(Json(outcome.into()))
}

/// Returns the router for universe commands.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve", post(resolve))
        .route("/pair", post(pair))
}

#[cfg(test)]
mod tests {
    use storyverse_catalog::seed_catalog;
    use storyverse_core::collaborator::ScenarioRecord;
    use storyverse_resolution::{ResolutionOptions, resolve_query};

    use super::*;

    fn outcome_for(query: &str) -> OrchestrationOutcome {
        let catalog = seed_catalog();
        let resolved = resolve_query(query, &catalog, &ResolutionOptions::default()).unwrap();
        OrchestrationOutcome {
            query: query.to_owned(),
            source: resolved.source,
            target: resolved.target,
            resolution: resolved.metadata,
            suggestions: Vec::new(),
            scenario: ScenarioRecord {
                title: String::new(),
                bridge: String::new(),
                timeline_beats: Vec::new(),
                risk: String::new(),
            },
        }
    }

    #[test]
    fn test_choices_never_pair_an_entity_with_itself() {
        // Arrange
        let outcome = outcome_for("Connect Empire to Rome");
        assert!(outcome.resolution.needs_clarification);

        // Act
        let response = UniverseResponse::from(outcome);

        // Assert
        assert!(!response.clarification_choices.is_empty());
        assert!(response.clarification_choices.len() <= DEFAULT_MAX_CHOICES);
        assert!(
            response
                .clarification_choices
                .iter()
                .all(|choice| choice.source_id != choice.target_id)
        );
    }

    #[test]
    fn test_confident_resolution_has_no_choices() {
        let response = UniverseResponse::from(outcome_for("Connect Sherlock Holmes to Star Wars."));

        assert!(response.clarification_choices.is_empty());
    }
}
