// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /api/webhook

use super::common::*;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use competition_entry_node::{
    api::{create_app, AppState},
    config::ServerConfig,
    entries::PaymentStatus,
    payments::WebhookVerifier,
    storage::{EntryStore, InMemoryEntryStore},
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

const SECRET: &str = "whsec_test_secret";

fn event(event_type: &str, payment_intent_id: &str) -> Vec<u8> {
    json!({
        "id": "evt_1",
        "type": event_type,
        "data": {"object": {"id": payment_intent_id, "status": "requires_payment_method"}}
    })
    .to_string()
    .into_bytes()
}

fn webhook_request(payload: Vec<u8>, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/webhook")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    builder.body(Body::from(payload)).unwrap()
}

fn signed(payload: Vec<u8>) -> Request<Body> {
    let signature = WebhookVerifier::new(SECRET)
        .sign(&payload, Utc::now().timestamp())
        .unwrap();
    webhook_request(payload, Some(signature))
}

#[tokio::test]
async fn test_payment_failed_marks_entry() {
    let node = TestNode::new().await;
    let entry_id = submit_text_entry(&node, "u1", "pi_bounce").await;

    let response = node
        .send(signed(event("payment_intent.payment_failed", "pi_bounce")))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"received": true}));

    let entry = node
        .store
        .find_by_payment_intent("pi_bounce")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.id.to_string(), entry_id);
    assert_eq!(entry.payment_status, PaymentStatus::Failed);

    let listed = body_json(node.send(get("/api/entries/u1")).await).await;
    assert_eq!(listed[0]["paymentStatus"], "failed");
}

#[tokio::test]
async fn test_unknown_intent_and_other_events_acknowledged() {
    let node = TestNode::new().await;
    submit_text_entry(&node, "u1", "pi_fine").await;

    let response = node
        .send(signed(event("payment_intent.payment_failed", "pi_unknown")))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = node
        .send(signed(event("payment_intent.succeeded", "pi_fine")))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let entry = node
        .store
        .find_by_payment_intent("pi_fine")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.payment_status, PaymentStatus::Succeeded);
}

#[tokio::test]
async fn test_bad_signature_rejected() {
    let node = TestNode::new().await;
    submit_text_entry(&node, "u1", "pi_safe").await;

    let payload = event("payment_intent.payment_failed", "pi_safe");
    let forged = WebhookVerifier::new("whsec_other")
        .sign(&payload, Utc::now().timestamp())
        .unwrap();
    let response = node.send(webhook_request(payload, Some(forged))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "webhook_auth_error");

    let payload = event("payment_intent.payment_failed", "pi_safe");
    let response = node.send(webhook_request(payload, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let entry = node
        .store
        .find_by_payment_intent("pi_safe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.payment_status, PaymentStatus::Succeeded);
}

#[tokio::test]
async fn test_stale_signature_rejected() {
    let node = TestNode::new().await;
    let payload = event("payment_intent.payment_failed", "pi_old");
    let signature = WebhookVerifier::new(SECRET)
        .sign(&payload, Utc::now().timestamp() - 3600)
        .unwrap();

    let response = node.send(webhook_request(payload, Some(signature))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unconfigured_secret_refuses_events() {
    let state = AppState::new(ServerConfig::default());
    state
        .set_entry_store(Arc::new(InMemoryEntryStore::new()))
        .await;
    let app = create_app(state);

    let response = app
        .oneshot(signed(event("payment_intent.payment_failed", "pi_x")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_out_of_range_timestamp_is_auth_error() {
    let node = TestNode::new().await;
    let payload = event("payment_intent.payment_failed", "pi_x");
    let header = format!("t={},v1={}", i64::MIN, "00".repeat(32));

    let response = node.send(webhook_request(payload, Some(header))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "webhook_auth_error");
}
