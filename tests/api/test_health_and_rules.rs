// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Index, health, fee preview and submission rules endpoints

use super::common::*;
use axum::http::{Method, StatusCode};
use competition_entry_node::api::{create_app, AppState};
use tower::util::ServiceExt;

#[tokio::test]
async fn test_health_reports_ready_components() {
    let node = TestNode::new().await;
    let response = node.send(get("/api/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["entryStore"]["available"], true);
    assert_eq!(json["entryStore"]["backend"], "memory");
    assert_eq!(json["paymentProvider"]["backend"], "mock");
    assert_eq!(json["version"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["version"]["features"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "signed-webhooks"));
}

#[tokio::test]
async fn test_health_degraded_without_dependencies() {
    let app = create_app(AppState::new_for_test());
    let response = app.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["entryStore"]["available"], false);
    assert_eq!(json["paymentProvider"]["available"], false);
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let node = TestNode::new().await;
    let json = body_json(node.send(get("/")).await).await;

    assert_eq!(json["status"], "running");
    assert!(json["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "POST /api/entries"));
}

#[tokio::test]
async fn test_fee_preview() {
    let node = TestNode::new().await;

    let json = body_json(node.send(get("/api/fees/technology")).await).await;
    assert_eq!(json["category"], "technology");
    assert_eq!(json["entryFee"], 99);
    assert_eq!(json["stripeFee"], 4);
    assert_eq!(json["totalAmount"], 103);

    let response = node.send(get("/api/fees/sports")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "invalid_category");
}

#[tokio::test]
async fn test_submission_rules_use_upload_cap() {
    let node = TestNode::new().await;
    let json = body_json(node.send(get("/api/submission-rules")).await).await;

    assert_eq!(json["maxFileBytes"], 4 * 1024 * 1024);
    assert_eq!(json["textMinWords"], 100);
    assert_eq!(json["titleMaxChars"], 100);
    assert_eq!(json["categories"].as_array().unwrap().len(), 4);
    assert_eq!(json["entryTypes"][1], "pitch-deck");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let node = TestNode::new().await;
    let response = node
        .send(json_request(Method::POST, "/api/nothing-here", serde_json::json!({})))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["errorType"], "not_found");
    assert_eq!(json["details"]["path"], "/api/nothing-here");
}
