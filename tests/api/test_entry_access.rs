// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Listing, deletion and file access by owner

use super::common::*;
use axum::http::{Method, StatusCode};
use competition_entry_node::storage::EntryStore;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_listing_is_stable_and_owner_scoped() {
    let node = TestNode::new().await;
    submit_text_entry(&node, "u1", "pi_a").await;
    submit_text_entry(&node, "u1", "pi_b").await;
    submit_text_entry(&node, "u2", "pi_c").await;

    let first = body_json(node.send(get("/api/entries/u1")).await).await;
    let second = body_json(node.send(get("/api/entries/u1")).await).await;

    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert!(first
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["userId"] == "u1"));

    let nobody = body_json(node.send(get("/api/entries/nobody")).await).await;
    assert_eq!(nobody, json!([]));
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let node = TestNode::new().await;
    let entry_id = submit_text_entry(&node, "u1", "pi_keep").await;

    let response = node
        .send(json_request(
            Method::DELETE,
            &format!("/api/entries/{}", entry_id),
            json!({"userId": "u2"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["errorType"], "forbidden");

    let id = Uuid::parse_str(&entry_id).unwrap();
    assert!(node.store.find_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_owner_deletes_entry() {
    let node = TestNode::new().await;
    let entry_id = submit_text_entry(&node, "u1", "pi_gone").await;

    let response = node
        .send(json_request(
            Method::DELETE,
            &format!("/api/entries/{}", entry_id),
            json!({"userId": "u1"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Entry deleted successfully"
    );
    assert!(node.store.is_empty().await);

    // Second delete finds nothing
    let response = node
        .send(json_request(
            Method::DELETE,
            &format!("/api/entries/{}", entry_id),
            json!({"userId": "u1"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_user_and_valid_id() {
    let node = TestNode::new().await;
    let entry_id = submit_text_entry(&node, "u1", "pi_x").await;

    let response = node
        .send(json_request(
            Method::DELETE,
            &format!("/api/entries/{}", entry_id),
            json!({}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "missing_field");

    let response = node
        .send(json_request(
            Method::DELETE,
            "/api/entries/not-a-uuid",
            json!({"userId": "u1"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(node.store.len().await, 1);
}

#[tokio::test]
async fn test_file_hidden_from_other_users() {
    let node = TestNode::new().await;
    submit_text_entry(&node, "u1", "pi_text").await;

    // Text entries have no file
    let response = node.send(get("/api/file/pi_text?userId=u1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = node.send(get("/api/file/pi_text?userId=u2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = node.send(get("/api/file/pi_text")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
