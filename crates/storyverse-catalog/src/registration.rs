//! Registration of externally generated catalog entries.

use std::collections::HashSet;

use serde::Serialize;
use storyverse_core::catalog::CatalogEntity;
use tracing::{info, warn};

use crate::cache::CatalogCache;
use crate::file_store::{FileCatalogStore, slugify};

/// Outcome of a registration batch.
#[derive(Debug, Default, Serialize)]
pub struct RegistrationReport {
    /// Entries written to the store, with normalized ids.
    pub registered: Vec<CatalogEntity>,
    /// Titles (or raw ids) of candidates that were rejected.
    pub skipped: Vec<String>,
    /// Titles of accepted candidates the store failed to persist.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

/// Validates `candidates` against the current catalog, appends the accepted
/// ones to `store` and invalidates `cache`. Only entries found in the store
/// after the write are reported as registered; the rest land in `failed`.
///
/// A candidate is skipped when its slugified id or its title is empty, or
/// when its id or case-folded title already exists in the catalog or earlier
/// in the same batch.
pub async fn register_generated(
    cache: &CatalogCache,
    store: &FileCatalogStore,
    candidates: Vec<CatalogEntity>,
) -> RegistrationReport {
    let catalog = cache.get().await;
    let mut ids: HashSet<String> = catalog.iter().map(|e| e.id.clone()).collect();
    let mut titles: HashSet<String> = catalog.iter().map(|e| e.title.to_lowercase()).collect();

    let mut report = RegistrationReport::default();
    let mut accepted = Vec::new();
    for mut candidate in candidates {
        let title = candidate.title.trim().to_owned();
        let id = slugify(candidate.id.trim());
        if id.is_empty() || title.is_empty() {
            report.skipped.push(candidate.id);
            continue;
        }
        if ids.contains(&id) || titles.contains(&title.to_lowercase()) {
            report.skipped.push(title);
            continue;
        }
        ids.insert(id.clone());
        titles.insert(title.to_lowercase());
        candidate.id = id;
        candidate.title = title;
        accepted.push(candidate);
    }
    if accepted.is_empty() {
        return report;
    }

    let written = store.append(&accepted).await;
    let persisted: HashSet<String> = store
        .read_entries()
        .await
        .into_iter()
        .map(|e| e.id)
        .collect();
    let (registered, failed): (Vec<_>, Vec<_>) =
        accepted.into_iter().partition(|e| persisted.contains(&e.id));
    report.registered = registered;
    report.failed = failed.into_iter().map(|e| e.title).collect();

    if !report.registered.is_empty() {
        cache.invalidate();
    }
    if report.failed.is_empty() {
        info!(
            registered = report.registered.len(),
            written,
            skipped = report.skipped.len(),
            "catalog entries registered"
        );
    } else {
        warn!(
            registered = report.registered.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "catalog entries could not be persisted"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use storyverse_core::catalog::{CatalogEntity, Medium};
    use storyverse_test_support::{FixedClock, StaticCatalogStore};

    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::seed::seed_catalog;

    fn cache_over(file: &FileCatalogStore) -> CatalogCache {
        CatalogCache::new(
            seed_catalog(),
            Arc::new(StaticCatalogStore::default()),
            Arc::new(file.clone()),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            DEFAULT_TTL,
        )
    }

    #[tokio::test]
    async fn test_register_appends_and_invalidates_cache() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("generated.json"));
        let cache = cache_over(&store);
        assert_eq!(cache.get().await.len(), 8);

        // Act
        let report = register_generated(
            &cache,
            &store,
            vec![CatalogEntity::new("The Iliad", "The Iliad", Medium::Novel, "War at Troy.", &["iliad"])],
        )
        .await;

        // Assert
        assert_eq!(report.registered.len(), 1);
        assert_eq!(report.registered[0].id, "the-iliad");
        let catalog = cache.get().await;
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog[8].id, "the-iliad");
    }

    #[tokio::test]
    async fn test_register_skips_existing_titles_and_batch_duplicates() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("generated.json"));
        let cache = cache_over(&store);

        // Act
        let report = register_generated(
            &cache,
            &store,
            vec![
                CatalogEntity::new("dune-novel", "dune", Medium::Novel, "", &[]),
                CatalogEntity::new("alien", "Alien", Medium::Movie, "", &[]),
                CatalogEntity::new("alien", "Alien Again", Medium::Movie, "", &[]),
                CatalogEntity::new("  ", "Nameless", Medium::Movie, "", &[]),
            ],
        )
        .await;

        // Assert
        let registered: Vec<&str> = report.registered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(registered, vec!["alien"]);
        assert_eq!(report.skipped, vec!["dune", "Alien Again", "  "]);
    }

    #[tokio::test]
    async fn test_unwritable_store_reports_entries_as_failed() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();
        let store = FileCatalogStore::new(blocker.join("generated.json"));
        let cache = cache_over(&store);

        // Act
        let report = register_generated(
            &cache,
            &store,
            vec![CatalogEntity::new("alien", "Alien", Medium::Movie, "", &[])],
        )
        .await;

        // Assert
        assert!(report.registered.is_empty());
        assert_eq!(report.failed, vec!["Alien"]);
        assert_eq!(cache.get().await.len(), 8);
    }
}
