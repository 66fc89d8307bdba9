//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storyverse_api::build_router;
use storyverse_api::state::AppState;
use storyverse_catalog::{CatalogCache, DEFAULT_TTL, FileCatalogStore, seed_catalog};
use storyverse_core::collaborator::{NeighborService, SynthesisService};
use storyverse_orchestration::{
    ActionPolicy, CommandActions, NavigatorService, Orchestrator, StorytellerService,
};
use storyverse_resolution::ResolutionOptions;
use storyverse_test_support::{FixedClock, StaticCatalogStore};
use tower::ServiceExt;

/// A policy with short delays so failing tests stay fast.
pub fn fast_policy() -> ActionPolicy {
    ActionPolicy::new(Duration::from_secs(5), 2, Duration::from_millis(5))
}

/// Build the full app router with the built-in collaborators and a file
/// store at `catalog_file`. Uses the same route structure as `main.rs`.
pub fn build_test_app(catalog_file: &Path) -> Router {
    build_test_app_with(
        catalog_file,
        Arc::new(NavigatorService::templated()),
        Arc::new(StorytellerService),
        fast_policy(),
    )
}

/// Build the full app router with custom collaborators and policy.
pub fn build_test_app_with(
    catalog_file: &Path,
    neighbors: Arc<dyn NeighborService>,
    synthesis: Arc<dyn SynthesisService>,
    policy: ActionPolicy,
) -> Router {
    let clock = FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    );
    let file_store = Arc::new(FileCatalogStore::new(catalog_file));
    let catalog = Arc::new(CatalogCache::new(
        seed_catalog(),
        Arc::new(StaticCatalogStore::default()),
        file_store.clone(),
        Arc::new(clock),
        DEFAULT_TTL,
    ));
    let actions = Arc::new(CommandActions::new(
        catalog.clone(),
        Orchestrator::new(neighbors, synthesis),
        policy,
        ResolutionOptions::default(),
    ));

    build_router(AppState::new(catalog, file_store, actions))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
