//! Store used when no primary backend is configured.

use async_trait::async_trait;
use storyverse_core::catalog::{CatalogEntity, CatalogStore};
use storyverse_core::error::DomainError;

/// A catalog store with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCatalogStore;

#[async_trait]
impl CatalogStore for NullCatalogStore {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        Ok(Vec::new())
    }
}
