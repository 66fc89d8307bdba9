//! Test stores: mock `CatalogStore` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use storyverse_core::catalog::{CatalogEntity, CatalogStore};
use storyverse_core::error::DomainError;

/// A store that returns the same generated entries on every call.
#[derive(Debug, Default)]
pub struct StaticCatalogStore(pub Vec<CatalogEntity>);

#[async_trait]
impl CatalogStore for StaticCatalogStore {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        Ok(self.0.clone())
    }
}

/// A store that always returns an infrastructure error. Useful for testing
/// that backend failures are swallowed.
#[derive(Debug)]
pub struct FailingCatalogStore;

#[async_trait]
impl CatalogStore for FailingCatalogStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A store that returns fixed entries and counts how often it was asked.
#[derive(Debug, Default)]
pub struct CountingCatalogStore {
    entries: Vec<CatalogEntity>,
    calls: AtomicUsize,
}

impl CountingCatalogStore {
    /// Create a counting store that returns `entries` on every call.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntity>) -> Self {
        Self {
            entries,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `load_generated` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for CountingCatalogStore {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}
