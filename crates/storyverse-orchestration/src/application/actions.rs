//! The command action layer: the two public entry points and the
//! timeout/retry wrapper around every orchestration run.

use std::future::Future;
use std::sync::Arc;

use storyverse_catalog::CatalogCache;
use storyverse_core::error::DomainError;
use storyverse_resolution::{
    Locale, ResolutionError, ResolutionOptions, connect_prompt, resolve_manual, resolve_query,
};
use tracing::{debug, error, info, instrument, warn};

use super::orchestrator::Orchestrator;
use crate::domain::failure::{CommandFailure, SelectionProblem};
use crate::domain::outcome::OrchestrationOutcome;
use crate::domain::policy::ActionPolicy;

/// Log context for one command.
#[derive(Debug, Clone, Copy)]
struct ActionContext<'a> {
    action: &'static str,
    query: &'a str,
    source_id: Option<&'a str>,
    target_id: Option<&'a str>,
}

/// Why one attempt failed. Resolution failures are deterministic for a
/// given catalog and end the run at once; collaborator failures are retried.
#[derive(Debug)]
enum AttemptError {
    Resolution(ResolutionError),
    Collaborator(DomainError),
}

impl From<DomainError> for AttemptError {
    fn from(error: DomainError) -> Self {
        Self::Collaborator(error)
    }
}

/// Validates user commands and runs them through the orchestrator.
pub struct CommandActions {
    catalog: Arc<CatalogCache>,
    orchestrator: Orchestrator,
    policy: ActionPolicy,
    options: ResolutionOptions,
}

impl CommandActions {
    /// Creates the action layer.
    #[must_use]
    pub fn new(
        catalog: Arc<CatalogCache>,
        orchestrator: Orchestrator,
        policy: ActionPolicy,
        options: ResolutionOptions,
    ) -> Self {
        Self {
            catalog,
            orchestrator,
            policy,
            options,
        }
    }

    /// Resolves free text into a pair and runs the orchestrator for it.
    ///
    /// The catalog snapshot is read and the query resolved inside each
    /// attempt, so a retry starts from scratch.
    ///
    /// # Errors
    ///
    /// `EmptyQuery` for blank text; otherwise `Timeout` or `ExecutionFailed`
    /// once the run is abandoned.
    #[instrument(skip(self))]
    pub async fn resolve_and_run(&self, text: &str) -> Result<OrchestrationOutcome, CommandFailure> {
        let query = text.trim();
        if query.is_empty() {
            debug!("empty query rejected");
            return Err(CommandFailure::EmptyQuery);
        }

        let context = ActionContext {
            action: "resolve_and_run",
            query,
            source_id: None,
            target_id: None,
        };
        self.execute(context, move || async move {
            let catalog = self.catalog.get().await;
            let resolved =
                resolve_query(query, &catalog, &self.options).map_err(AttemptError::Resolution)?;
            Ok(self
                .orchestrator
                .run(query, &resolved.source, &resolved.target, &resolved.metadata)
                .await?)
        })
        .await
    }

    /// Runs the orchestrator for a pair the caller picked by id.
    ///
    /// Both ids are checked against the current catalog snapshot before the
    /// timeout/retry machinery engages. When `text` is blank the query
    /// defaults to the English connect phrasing of the two titles.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` for blank, equal or unknown ids; otherwise
    /// `Timeout` or `ExecutionFailed` once the run is abandoned.
    #[instrument(skip(self))]
    pub async fn run_with_pair(
        &self,
        source_id: &str,
        target_id: &str,
        text: Option<&str>,
    ) -> Result<OrchestrationOutcome, CommandFailure> {
        let source_id = source_id.trim();
        let target_id = target_id.trim();
        if source_id.is_empty() || target_id.is_empty() {
            return Err(CommandFailure::InvalidSelection(SelectionProblem::Missing));
        }
        if source_id == target_id {
            return Err(CommandFailure::InvalidSelection(SelectionProblem::SameNode));
        }

        let catalog = self.catalog.get().await;
        let find = |id: &str| catalog.iter().find(|entity| entity.id == id);
        let (Some(source), Some(target)) = (find(source_id), find(target_id)) else {
            info!(source_id, target_id, "selection not in catalog");
            return Err(CommandFailure::InvalidSelection(
                SelectionProblem::NotInCatalog,
            ));
        };

        let query = match text.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => connect_prompt(Locale::En, &source.title, &target.title),
        };
        let resolved = resolve_manual(&query, source, target);

        let context = ActionContext {
            action: "run_with_pair",
            query: &query,
            source_id: Some(source_id),
            target_id: Some(target_id),
        };
        let query = query.as_str();
        let resolved = &resolved;
        self.execute(context, move || async move {
            Ok(self
                .orchestrator
                .run(query, &resolved.source, &resolved.target, &resolved.metadata)
                .await?)
        })
        .await
    }

    /// Runs `run` under the policy's timeout, retrying collaborator failures
    /// with linear backoff. Timeouts and resolution failures are terminal on
    /// the first occurrence. Logs once on terminal failure.
    async fn execute<F, Fut>(
        &self,
        context: ActionContext<'_>,
        run: F,
    ) -> Result<OrchestrationOutcome, CommandFailure>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<OrchestrationOutcome, AttemptError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        // `None` after the loop means the last attempt timed out.
        let mut last_error = None;
        let mut attempts = 0;

        for attempt in 1..=max_attempts {
            attempts = attempt;
            match tokio::time::timeout(self.policy.timeout, run()).await {
                Ok(Ok(outcome)) => return Ok(outcome),
                Ok(Err(AttemptError::Resolution(e))) => {
                    last_error = Some(e.to_string());
                    break;
                }
                Ok(Err(AttemptError::Collaborator(e))) => {
                    warn!(action = context.action, attempt, error = %e, "command attempt failed");
                    last_error = Some(e.to_string());
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.backoff(attempt)).await;
                    }
                }
                Err(_) => {
                    last_error = None;
                    break;
                }
            }
        }

        let (failure, detail) = match last_error {
            Some(detail) => (CommandFailure::ExecutionFailed, detail),
            None => (
                CommandFailure::Timeout {
                    budget: self.policy.timeout,
                },
                "attempt exceeded its budget".to_owned(),
            ),
        };
        error!(
            action = context.action,
            query = context.query,
            source_id = context.source_id,
            target_id = context.target_id,
            attempts,
            code = failure.code(),
            error = %detail,
            "command action failed"
        );
        Err(failure)
    }
}
