//! StoryVerse API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use storyverse_api::config::AppConfig;
use storyverse_api::error::AppError;
use storyverse_api::state::AppState;
use storyverse_catalog::{
    CatalogCache, FileCatalogStore, NullCatalogStore, PgCatalogStore, seed_catalog,
};
use storyverse_core::catalog::{CatalogStore, RelatedEntitySource};
use storyverse_core::clock::SystemClock;
use storyverse_orchestration::{CommandActions, NavigatorService, Orchestrator, StorytellerService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting StoryVerse API server");

    let config = AppConfig::from_env()?;

    // Primary catalog backend, if configured. The same store doubles as the
    // relation graph for neighbor suggestions.
    let (primary, graph): (Arc<dyn CatalogStore>, Option<Arc<dyn RelatedEntitySource>>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(database_url)
                    .await?;
                let store = Arc::new(PgCatalogStore::new(pool));
                if let Err(error) = store.ensure_schema().await {
                    tracing::warn!(%error, "catalog schema setup failed");
                }
                let primary: Arc<dyn CatalogStore> = store.clone();
                let graph: Arc<dyn RelatedEntitySource> = store;
                (primary, Some(graph))
            }
            None => {
                tracing::info!("DATABASE_URL not set; primary catalog backend disabled");
                let primary: Arc<dyn CatalogStore> = Arc::new(NullCatalogStore);
                (primary, None)
            }
        };

    let catalog_file = Arc::new(FileCatalogStore::new(config.catalog_file.clone()));
    let catalog = Arc::new(CatalogCache::new(
        seed_catalog(),
        primary,
        catalog_file.clone(),
        Arc::new(SystemClock),
        config.catalog_ttl,
    ));

    let navigator = graph.map_or_else(NavigatorService::templated, NavigatorService::new);
    let orchestrator = Orchestrator::new(Arc::new(navigator), Arc::new(StorytellerService));
    let actions = Arc::new(CommandActions::new(
        Arc::clone(&catalog),
        orchestrator,
        config.policy,
        config.resolution.clone(),
    ));

    let app = storyverse_api::build_router(AppState::new(catalog, catalog_file, actions));

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
