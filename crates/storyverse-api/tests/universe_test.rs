//! Integration tests for the universe commands.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use storyverse_orchestration::{ActionPolicy, StorytellerService};
use storyverse_test_support::{
    EchoNeighborService, FailingNeighborService, PendingSynthesisService,
};

#[tokio::test]
async fn test_resolve_runs_the_bridge() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/resolve",
        &serde_json::json!({ "query": "Connect Sherlock Holmes to Star Wars." }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "Connect Sherlock Holmes to Star Wars.");
    assert_eq!(json["source"]["id"], "sherlock-holmes");
    assert_eq!(json["target"]["id"], "star-wars");
    assert_eq!(json["resolution"]["strategy"], "explicit_pair");
    assert_eq!(json["resolution"]["confidence"], "high");
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
    assert_eq!(json["suggestions"][0]["id"], "sherlock-holmes-fallback-1");
    assert_eq!(json["scenario"]["title"], "What If Sherlock Holmes Met Star Wars?");
    assert!(json.get("clarification_choices").is_none());
}

#[tokio::test]
async fn test_ambiguous_query_offers_choices() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/resolve",
        &serde_json::json!({ "query": "Connect Empire to Dune" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resolution"]["needs_clarification"], true);
    assert_eq!(
        json["clarification_choices"],
        serde_json::json!([{
            "source_id": "napoleon",
            "target_id": "dune",
            "prompt": "Connect Napoleon Bonaparte to Dune."
        }])
    );
}

#[tokio::test]
async fn test_blank_query_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/resolve",
        &serde_json::json!({ "query": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "EMPTY_QUERY");
    assert_eq!(json["message"], "Query is empty. Ask to connect two story nodes.");
}

#[tokio::test]
async fn test_pair_uses_default_query_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/pair",
        &serde_json::json!({ "source_id": "dune", "target_id": "cleopatra" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "Connect Dune to Cleopatra.");
    assert_eq!(json["resolution"]["strategy"], "manual_selection");
    assert_eq!(json["resolution"]["locale"], "en");
}

#[tokio::test]
async fn test_pair_with_equal_ids_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/pair",
        &serde_json::json!({ "source_id": "dune", "target_id": "dune" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "INVALID_SELECTION");
    assert_eq!(json["message"], "Source and target must be different nodes.");
}

#[tokio::test]
async fn test_collaborator_failure_returns_502_without_internals() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with(
        &dir.path().join("catalog.json"),
        Arc::new(FailingNeighborService::default()),
        Arc::new(StorytellerService),
        common::fast_policy(),
    );

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/resolve",
        &serde_json::json!({ "query": "Dune x Roman Empire" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "EXECUTION_FAILED");
    assert!(!json["message"].as_str().unwrap().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_hung_collaborator_returns_504() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with(
        &dir.path().join("catalog.json"),
        Arc::new(EchoNeighborService::default()),
        Arc::new(PendingSynthesisService::default()),
        ActionPolicy::new(Duration::from_millis(50), 2, Duration::from_millis(5)),
    );

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/pair",
        &serde_json::json!({ "source_id": "dune", "target_id": "cleopatra" }),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "TIMEOUT");
}

#[tokio::test]
async fn test_choices_are_all_selectable_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("catalog.json"));

    let (status, json) = common::post_json(
        app,
        "/api/v1/universe/resolve",
        &serde_json::json!({ "query": "Connect Empire to Rome" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let choices = json["clarification_choices"].as_array().unwrap();
    assert!(!choices.is_empty());
    assert!(choices.iter().all(|c| c["source_id"] != c["target_id"]));
}
