//! File-backed catalog store, the fallback when the primary backend has no
//! generated entries.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use storyverse_core::catalog::{CatalogEntity, CatalogStore};
use storyverse_core::error::DomainError;
use tracing::{debug, warn};

/// Default location of the generated-catalog file.
pub const DEFAULT_CATALOG_FILE: &str = "data/generated-catalog.json";

/// Generated catalog entries persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    /// Creates a store reading from and appending to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every well-formed entry from the file. A missing file, an
    /// unreadable file or a document that is not a JSON array yields an
    /// empty list; malformed elements are skipped individually.
    pub async fn read_entries(&self) -> Vec<CatalogEntity> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "failed to read catalog file");
                return Vec::new();
            }
        };

        let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) else {
            warn!(path = %self.path.display(), "catalog file is not a JSON array");
            return Vec::new();
        };

        values
            .into_iter()
            .filter_map(|value| serde_json::from_value::<CatalogEntity>(value).ok())
            .collect()
    }

    /// Appends `entries` whose id is not already in the file. Best-effort:
    /// I/O failures are logged and reported as zero appended entries.
    ///
    /// Returns the number of entries written.
    pub async fn append(&self, entries: &[CatalogEntity]) -> usize {
        match self.try_append(entries).await {
            Ok(count) => count,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "failed to append to catalog file");
                0
            }
        }
    }

    async fn try_append(&self, entries: &[CatalogEntity]) -> Result<usize, DomainError> {
        let mut merged = self.read_entries().await;
        let mut known: HashSet<String> = merged.iter().map(|e| e.id.clone()).collect();
        let before = merged.len();
        for entity in entries {
            if known.insert(entity.id.clone()) {
                merged.push(entity.clone());
            }
        }
        let appended = merged.len() - before;
        if appended == 0 {
            return Ok(0);
        }

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        }
        let document = serde_json::to_string_pretty(&merged)
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        tokio::fs::write(&self.path, document)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        debug!(path = %self.path.display(), appended, "catalog file updated");
        Ok(appended)
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        Ok(self.read_entries().await)
    }
}

/// Lowercases `id` and replaces every character outside `[a-z0-9-]` with
/// `-`.
#[must_use]
pub fn slugify(id: &str) -> String {
    id.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use storyverse_core::catalog::Medium;

    use super::*;

    fn entity(id: &str) -> CatalogEntity {
        CatalogEntity::new(id, id, Medium::Novel, "summary", &["alias"])
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("absent.json"));

        assert!(store.read_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_parent_directory_and_skips_known_ids() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("data").join("generated.json"));

        // Act
        let first = store.append(&[entity("iliad"), entity("odyssey")]).await;
        let second = store.append(&[entity("odyssey"), entity("aeneid")]).await;

        // Assert
        assert_eq!(first, 2);
        assert_eq!(second, 1);
        let ids: Vec<String> = store
            .load_generated()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["iliad", "odyssey", "aeneid"]);
    }

    #[tokio::test]
    async fn test_malformed_elements_are_skipped() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.json");
        std::fs::write(
            &path,
            r#"[{"id":"iliad","title":"The Iliad","medium":"Novel"},{"title":"no id"},42]"#,
        )
        .unwrap();
        let store = FileCatalogStore::new(path);

        // Act
        let entries = store.read_entries().await;

        // Assert
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "The Iliad");
    }

    #[tokio::test]
    async fn test_non_array_document_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.json");
        std::fs::write(&path, r#"{"id":"iliad"}"#).unwrap();

        assert!(FileCatalogStore::new(path).read_entries().await.is_empty());
    }

    #[test]
    fn test_slugify_replaces_non_slug_characters() {
        assert_eq!(slugify("The Iliad!"), "the-iliad-");
        assert_eq!(slugify("blade-runner-2049"), "blade-runner-2049");
        assert_eq!(slugify("반지"), "--");
    }
}
