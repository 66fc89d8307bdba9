//! Catalog entity model and the store traits that back it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The category of a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    /// A film or film franchise.
    Movie,
    /// A historical period, person or event.
    History,
    /// A novel or literary canon.
    Novel,
}

impl Medium {
    /// Parses a medium name case-insensitively, ignoring surrounding
    /// whitespace. Returns `None` for unknown names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "history" => Some(Self::History),
            "novel" => Some(Self::Novel),
            _ => None,
        }
    }

    /// Interprets a medium read from a backing store. Values that are not an
    /// exact variant name fall back to `Novel`.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        match value {
            "Movie" => Self::Movie,
            "History" => Self::History,
            _ => Self::Novel,
        }
    }
}

/// A narrative work or historical topic eligible to be a bridge endpoint.
///
/// Records are never mutated in place; an update replaces the whole record
/// keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    /// Unique, URL-safe slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category of the entity.
    pub medium: Medium,
    /// One-sentence thematic summary.
    #[serde(default)]
    pub summary: String,
    /// Alternative names, in preference order.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CatalogEntity {
    /// Creates a catalog entity.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        medium: Medium,
        summary: impl Into<String>,
        aliases: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            medium,
            summary: summary.into(),
            aliases: aliases.iter().map(|alias| (*alias).to_owned()).collect(),
        }
    }
}

/// A source of generated (non-seed) catalog entries.
///
/// Implementations should tolerate an unreachable backend by returning an
/// empty list; the catalog cache also swallows any error that does escape.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Short backend name used in log fields.
    fn name(&self) -> &'static str;

    /// Loads every entry flagged as a catalog member.
    async fn load_generated(&self) -> Result<Vec<CatalogEntity>, DomainError>;
}

/// A related-entity edge read from a graph-capable backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedEntity {
    /// The neighbouring entity.
    pub entity: CatalogEntity,
    /// Edge rank; higher is more relevant.
    pub rank: f64,
}

/// Graph traversal over catalog relations.
#[async_trait]
pub trait RelatedEntitySource: Send + Sync {
    /// Returns up to `limit` neighbours of `entity_id`, strongest first.
    async fn related(&self, entity_id: &str, limit: usize)
    -> Result<Vec<RelatedEntity>, DomainError>;
}
