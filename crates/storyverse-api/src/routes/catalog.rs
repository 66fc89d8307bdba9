//! Catalog listing and registration of generated entries.

use axum::extract::State;
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use storyverse_catalog::registration::{RegistrationReport, register_generated};
use storyverse_core::catalog::{CatalogEntity, Medium};
use tracing::{info, instrument};

use crate::state::AppState;

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Number of entities in the catalog.
    pub count: usize,
    /// Seed entities first, then generated ones.
    pub catalog: Vec<CatalogEntity>,
}

/// One generated entry submitted for registration.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    /// Requested id. Derived from the title when absent.
    pub id: Option<String>,
    pub title: String,
    pub medium: Medium,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Request body for POST /entries.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub entries: Vec<EntryRequest>,
}

impl From<EntryRequest> for CatalogEntity {
    fn from(entry: EntryRequest) -> Self {
        Self {
            id: entry.id.unwrap_or_else(|| entry.title.clone()),
            title: entry.title,
            medium: entry.medium,
            summary: entry.summary,
            aliases: entry.aliases,
        }
    }
}

/// GET /
async fn list_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.catalog.get().await;
    Json(CatalogResponse {
        count: catalog.len(),
        catalog: catalog.to_vec(),
    })
}

/// POST /entries
#[instrument(skip(state, request), fields(submitted = request.entries.len()))]
async fn register_entries(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Json<RegistrationReport> {
    info!("handling catalog registration");
    let candidates = request.entries.into_iter().map(CatalogEntity::from).collect();
    let report = register_generated(&state.catalog, &state.catalog_file, candidates).await;
    Json(report)
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog))
        .route("/entries", post(register_entries))
}
