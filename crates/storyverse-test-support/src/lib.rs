//! Shared test mocks and utilities for the StoryVerse bridge engine.

mod clock;
mod collaborators;
mod store;

pub use clock::{FixedClock, ManualClock};
pub use collaborators::{
    EchoNeighborService, EchoSynthesisService, FailingNeighborService, FlakySynthesisService,
    PendingSynthesisService,
};
pub use store::{CountingCatalogStore, FailingCatalogStore, StaticCatalogStore};
