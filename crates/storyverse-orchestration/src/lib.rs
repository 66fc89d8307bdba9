//! StoryVerse orchestration.
//!
//! Runs the neighbor-suggestion and narrative-synthesis collaborators
//! concurrently for a resolved pair, and wraps each run in the command
//! action layer: input validation, a hard timeout, bounded retries with
//! linear backoff and a closed failure taxonomy.

pub mod application;
pub mod domain;
pub mod services;

pub use application::actions::CommandActions;
pub use application::orchestrator::{Orchestrator, SUGGESTION_LIMIT};
pub use domain::failure::{CommandFailure, SelectionProblem};
pub use domain::outcome::OrchestrationOutcome;
pub use domain::policy::ActionPolicy;
pub use services::navigator::NavigatorService;
pub use services::storyteller::StorytellerService;
