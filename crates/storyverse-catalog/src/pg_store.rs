//! `PostgreSQL` implementation of the catalog store and relation graph.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use storyverse_core::catalog::{CatalogEntity, CatalogStore, Medium, RelatedEntity, RelatedEntitySource};
use storyverse_core::error::DomainError;

use crate::schema::CREATE_CATALOG_TABLES;

const LOAD_GENERATED_QUERY: &str = r"
SELECT id, title, medium, summary, aliases
FROM catalog_entities
WHERE is_catalog
ORDER BY created_at DESC
";

const RELATED_QUERY: &str = r"
SELECT c.id, c.title, c.medium, c.summary, c.aliases, r.rank
FROM catalog_relations r
JOIN catalog_entities c
  ON c.id = CASE WHEN r.source_id = $1 THEN r.target_id ELSE r.source_id END
WHERE r.source_id = $1 OR r.target_id = $1
ORDER BY r.rank DESC
LIMIT $2
";

/// PostgreSQL-backed catalog store.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Creates a new `PgCatalogStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the catalog tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_CATALOG_TABLES)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}

fn infrastructure(error: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("catalog database error: {error}"))
}

fn entity_from_row(row: &PgRow) -> Result<CatalogEntity, sqlx::Error> {
    let medium: String = row.try_get("medium")?;
    Ok(CatalogEntity {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        medium: Medium::from_stored(&medium),
        summary: row.try_get("summary")?,
        aliases: row.try_get("aliases")?,
    })
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError> {
        let rows = sqlx::query(LOAD_GENERATED_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        rows.iter()
            .map(entity_from_row)
            .collect::<Result<_, _>>()
            .map_err(infrastructure)
    }
}

#[async_trait]
impl RelatedEntitySource for PgCatalogStore {
    async fn related(
        &self,
        entity_id: &str,
        limit: usize,
    ) -> Result<Vec<RelatedEntity>, DomainError> {
        let rows = sqlx::query(RELATED_QUERY)
            .bind(entity_id)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        rows.iter()
            .map(|row| {
                Ok(RelatedEntity {
                    entity: entity_from_row(row)?,
                    rank: row.try_get("rank")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(infrastructure)
    }
}
