//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use storyverse_catalog::{CatalogCache, FileCatalogStore};
use storyverse_orchestration::CommandActions;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide catalog cache.
    pub catalog: Arc<CatalogCache>,
    /// File store that receives registered catalog entries.
    pub catalog_file: Arc<FileCatalogStore>,
    /// Command action layer.
    pub actions: Arc<CommandActions>,
    /// When the server started, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<CatalogCache>,
        catalog_file: Arc<FileCatalogStore>,
        actions: Arc<CommandActions>,
    ) -> Self {
        Self {
            catalog,
            catalog_file,
            actions,
            started_at: Instant::now(),
        }
    }
}
