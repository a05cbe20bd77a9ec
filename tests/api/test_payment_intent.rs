// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /api/create-payment-intent

use super::common::*;
use axum::http::{Method, StatusCode};
use competition_entry_node::api::{create_app, AppState};
use competition_entry_node::payments::PaymentProvider;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_creates_intent_with_fee_breakdown() {
    let node = TestNode::new().await;
    let response = node
        .send(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "business", "entryType": "pitch-deck"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["entryFee"], 49);
    assert_eq!(body["stripeFee"], 2);
    assert_eq!(body["totalAmount"], 51);
    assert!(body["clientSecret"].as_str().unwrap().starts_with("pi_mock_"));

    let intent = node
        .provider
        .retrieve_intent(body["paymentIntentId"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(intent.amount, 5100);
    assert_eq!(intent.metadata["entryType"], "pitch-deck");
}

#[tokio::test]
async fn test_missing_and_invalid_fields() {
    let node = TestNode::new().await;

    let response = node
        .send(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "business"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errorType"], "missing_field");
    assert_eq!(body["details"]["fields"], json!(["entryType"]));

    let response = node
        .send(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "sports", "entryType": "text"}),
        ))
        .await;
    assert_eq!(body_json(response).await["errorType"], "invalid_category");

    let response = node
        .send(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "creative", "entryType": "podcast"}),
        ))
        .await;
    assert_eq!(body_json(response).await["errorType"], "invalid_entry_type");

    assert_eq!(node.provider.intent_count().await, 0);
}

#[tokio::test]
async fn test_provider_failure_is_surfaced() {
    let node = TestNode::new().await;
    node.provider.fail_with("Your card was declined.").await;

    let response = node
        .send(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "creative", "entryType": "video"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["errorType"], "payment_provider_error");
    assert_eq!(body["message"], "Your card was declined.");
}

#[tokio::test]
async fn test_unavailable_without_provider() {
    let app = create_app(AppState::new_for_test());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/create-payment-intent",
            json!({"category": "creative", "entryType": "video"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["errorType"], "service_unavailable");
}

#[tokio::test]
async fn test_malformed_json() {
    let node = TestNode::new().await;
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/create-payment-intent")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = node.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "invalid_request");
}
