//! StoryVerse Catalog: the list of bridgeable entities.
//!
//! Serves `seed ++ generated` through a TTL-bounded read-through cache. The
//! generated part comes from a primary PostgreSQL backend with a JSON-file
//! fallback; the fixed seed set is always present.

pub mod cache;
pub mod file_store;
pub mod null_store;
pub mod pg_store;
pub mod registration;
pub mod schema;
pub mod seed;

pub use cache::{CatalogCache, DEFAULT_TTL};
pub use file_store::FileCatalogStore;
pub use null_store::NullCatalogStore;
pub use pg_store::PgCatalogStore;
pub use seed::seed_catalog;
