//! Catalog database schema.

/// SQL to create the catalog entity and relation tables.
pub const CREATE_CATALOG_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS catalog_entities (
    id          VARCHAR(255) PRIMARY KEY,
    title       TEXT NOT NULL,
    medium      VARCHAR(32) NOT NULL,
    summary     TEXT NOT NULL DEFAULT '',
    aliases     TEXT[] NOT NULL DEFAULT '{}',
    is_catalog  BOOLEAN NOT NULL DEFAULT TRUE,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS catalog_relations (
    source_id   VARCHAR(255) NOT NULL REFERENCES catalog_entities (id) ON DELETE CASCADE,
    target_id   VARCHAR(255) NOT NULL REFERENCES catalog_entities (id) ON DELETE CASCADE,
    rank        DOUBLE PRECISION NOT NULL DEFAULT 0,
    PRIMARY KEY (source_id, target_id)
);

CREATE INDEX IF NOT EXISTS idx_catalog_relations_target_id
    ON catalog_relations (target_id);
";
