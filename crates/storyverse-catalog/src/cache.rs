//! TTL-bounded read-through cache over the catalog stores.
//!
//! Readers never block each other. A refresh replaces the cached entry
//! wholesale; concurrent callers that all observe a stale entry each refresh,
//! and the duplicate work is tolerated. `invalidate()` bumps a generation
//! counter so that the next read refetches regardless of age, and a refresh
//! that raced an invalidation is returned to its caller but not cached.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use storyverse_core::catalog::{CatalogEntity, CatalogStore};
use storyverse_core::clock::Clock;
use tracing::{debug, warn};

/// Default time-to-live of a cached catalog.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// The cached catalog snapshot.
#[derive(Debug, Clone)]
struct CacheEntry {
    items: Arc<[CatalogEntity]>,
    fetched_at: DateTime<Utc>,
    generation: u64,
}

/// Read-through catalog cache. Owned by one long-lived instance per process
/// and shared behind an `Arc`.
pub struct CatalogCache {
    seed: Vec<CatalogEntity>,
    primary: Arc<dyn CatalogStore>,
    secondary: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    entry: RwLock<Option<CacheEntry>>,
    generation: AtomicU64,
}

impl CatalogCache {
    /// Creates a cache serving `seed ++ generated`, where generated entries
    /// come from `primary` or, when it yields nothing, from `secondary`.
    #[must_use]
    pub fn new(
        seed: Vec<CatalogEntity>,
        primary: Arc<dyn CatalogStore>,
        secondary: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            seed,
            primary,
            secondary,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            entry: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the current catalog snapshot.
    ///
    /// Within the TTL window the same `Arc` is returned on every call. Store
    /// errors never escape; a failing backend contributes no entries.
    pub async fn get(&self) -> Arc<[CatalogEntity]> {
        if let Some(items) = self.fresh_items() {
            return items;
        }

        let generation = self.generation.load(Ordering::Acquire);
        let generated = self.load_generated().await;
        let items: Arc<[CatalogEntity]> = self.merge_with_seed(generated).into();
        let entry = CacheEntry {
            items: Arc::clone(&items),
            fetched_at: self.clock.now(),
            generation,
        };

        let mut slot = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::Acquire) == generation {
            *slot = Some(entry);
        } else {
            debug!("catalog invalidated during refresh; result not cached");
        }
        items
    }

    /// Forces the next `get()` to refetch regardless of age.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    fn fresh_items(&self) -> Option<Arc<[CatalogEntity]>> {
        let slot = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        let entry = slot.as_ref()?;
        if entry.generation != self.generation.load(Ordering::Acquire) {
            return None;
        }
        if self.clock.now() - entry.fetched_at >= self.ttl {
            return None;
        }
        Some(Arc::clone(&entry.items))
    }

    async fn load_generated(&self) -> Vec<CatalogEntity> {
        let from_primary = load_or_empty(self.primary.as_ref()).await;
        if !from_primary.is_empty() {
            return from_primary;
        }
        load_or_empty(self.secondary.as_ref()).await
    }

    fn merge_with_seed(&self, generated: Vec<CatalogEntity>) -> Vec<CatalogEntity> {
        let mut seen: HashSet<String> = self.seed.iter().map(|e| e.id.clone()).collect();
        let mut items = self.seed.clone();
        for entity in generated {
            if seen.insert(entity.id.clone()) {
                items.push(entity);
            } else {
                debug!(id = %entity.id, "dropping generated entry with duplicate id");
            }
        }
        items
    }
}

async fn load_or_empty(store: &dyn CatalogStore) -> Vec<CatalogEntity> {
    match store.load_generated().await {
        Ok(entries) => entries,
        Err(error) => {
            warn!(store = store.name(), %error, "catalog store unavailable");
            Vec::new()
        }
    }
}
