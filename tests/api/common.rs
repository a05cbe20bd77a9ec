// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for API tests
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use competition_entry_node::{
    api::{create_app, AppState},
    payments::{FeeBreakdown, IntentStatus, MockPaymentProvider, PaymentIntent},
    storage::InMemoryEntryStore,
    Category,
};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

pub const BOUNDARY: &str = "entry-form-boundary";

pub struct TestNode {
    pub state: AppState,
    pub store: Arc<InMemoryEntryStore>,
    pub provider: MockPaymentProvider,
}

impl TestNode {
    pub async fn new() -> Self {
        let state = AppState::new_for_test();
        let store = Arc::new(InMemoryEntryStore::new());
        let provider = MockPaymentProvider::new();
        state.set_entry_store(store.clone()).await;
        state.set_payment_provider(Arc::new(provider.clone())).await;
        Self {
            state,
            store,
            provider,
        }
    }

    pub fn app(&self) -> Router {
        create_app(self.state.clone())
    }

    /// Register an intent as the provider would after checkout
    pub async fn paid_intent(&self, id: &str, category: Category, status: IntentStatus) {
        let fees = FeeBreakdown::for_category(category);
        let mut metadata = fees.to_metadata();
        metadata.insert("category".to_string(), category.to_string());
        self.provider
            .insert_intent(PaymentIntent {
                id: id.to_string(),
                client_secret: Some(format!("{}_secret", id)),
                status,
                amount: fees.total_minor_units(),
                currency: "usd".to_string(),
                metadata,
            })
            .await;
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app().oneshot(request).await.unwrap()
    }
}

pub fn words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}

/// A file part for a multipart body
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/entries")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Submit a valid text entry and return its id
pub async fn submit_text_entry(node: &TestNode, user_id: &str, payment_intent_id: &str) -> String {
    node.paid_intent(payment_intent_id, Category::Technology, IntentStatus::Succeeded)
        .await;
    let text = words(150);
    let body = multipart_body(
        &[
            ("userId", user_id),
            ("category", "technology"),
            ("entryType", "text"),
            ("title", "My Great Idea"),
            ("textContent", &text),
            ("paymentIntentId", payment_intent_id),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["entryId"]
        .as_str()
        .unwrap()
        .to_string()
}
