// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /api/entries

use super::common::*;
use axum::http::StatusCode;
use competition_entry_node::api::{create_app, AppState};
use competition_entry_node::payments::IntentStatus;
use competition_entry_node::storage::EntryStore;
use competition_entry_node::Category;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_paid_text_entry_is_created_and_listed() {
    let node = TestNode::new().await;
    node.paid_intent("pi_tech", Category::Technology, IntentStatus::Succeeded)
        .await;

    let text = words(150);
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "technology"),
            ("entryType", "text"),
            ("title", "My Great Idea"),
            ("textContent", &text),
            ("paymentIntentId", "pi_tech"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Entry submitted successfully");
    assert_eq!(created["replayed"], false);
    let entry_id = created["entryId"].as_str().unwrap().to_string();

    let listed = body_json(node.send(get("/api/entries/u1")).await).await;
    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], entry_id);
    assert_eq!(entries[0]["paymentStatus"], "succeeded");
    assert_eq!(entries[0]["entryFee"], 99);
    assert_eq!(entries[0]["totalAmount"], 103);
    assert_eq!(entries[0]["status"], "submitted");
}

#[tokio::test]
async fn test_unpaid_intent_is_rejected_without_write() {
    let node = TestNode::new().await;
    node.paid_intent("pi_open", Category::Technology, IntentStatus::RequiresPaymentMethod)
        .await;

    let text = words(150);
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "technology"),
            ("entryType", "text"),
            ("title", "My Great Idea"),
            ("textContent", &text),
            ("paymentIntentId", "pi_open"),
            // Client-supplied amounts are never trusted
            ("entryFee", "0"),
            ("totalAmount", "0"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errorType"], "payment_incomplete");
    assert_eq!(json["details"]["status"], "requires_payment_method");
    assert!(node.store.is_empty().await);
}

#[tokio::test]
async fn test_validation_reports_all_violations() {
    let node = TestNode::new().await;
    let short = words(99);
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "creative"),
            ("entryType", "text"),
            ("title", "Idea"),
            ("textContent", &short),
            ("paymentIntentId", "pi_any"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let kinds: Vec<&str> = json["details"]["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["title_length_violation", "text_length_violation"]);
}

#[tokio::test]
async fn test_missing_fields_listed() {
    let node = TestNode::new().await;
    let body = multipart_body(&[("category", "business"), ("entryType", "video")], None);
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errorType"], "missing_field");
    assert_eq!(
        json["details"]["fields"],
        serde_json::json!(["userId", "title", "paymentIntentId"])
    );
}

#[tokio::test]
async fn test_video_url_checked() {
    let node = TestNode::new().await;
    node.paid_intent("pi_vid", Category::Creative, IntentStatus::Succeeded)
        .await;

    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "creative"),
            ("entryType", "video"),
            ("title", "Short film"),
            ("videoUrl", "https://example.com/video"),
            ("paymentIntentId", "pi_vid"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;
    assert_eq!(body_json(response).await["errorType"], "invalid_video_url");

    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "creative"),
            ("entryType", "video"),
            ("title", "Short film"),
            ("videoUrl", "https://youtu.be/abc123"),
            ("paymentIntentId", "pi_vid"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_pitch_deck_upload_and_download() {
    let node = TestNode::new().await;
    node.paid_intent("pi_deck", Category::Business, IntentStatus::Succeeded)
        .await;

    let deck = b"%PDF-1.4 fake deck".to_vec();
    let body = multipart_body(
        &[
            ("userId", "founder 1"),
            ("category", "business"),
            ("entryType", "pitch-deck"),
            ("title", "Seed round deck"),
            ("paymentIntentId", "pi_deck"),
        ],
        Some(FilePart {
            file_name: "deck.pdf",
            content_type: "application/pdf",
            data: &deck,
        }),
    );
    let response = node.send(multipart_request(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let listed = body_json(node.send(get("/api/entries/founder%201")).await).await;
    let entry = &listed[0];
    assert_eq!(entry["entryType"], "pitch-deck");
    assert_eq!(entry["fileSize"], deck.len());
    assert!(entry.get("fileData").is_none());
    let file_url = entry["fileUrl"].as_str().unwrap().to_string();
    assert_eq!(file_url, "/api/file/pi_deck?userId=founder+1");

    let response = node.send(get(&file_url)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"deck.pdf\""
    );
    assert_eq!(body_bytes(response).await, deck);
}

#[tokio::test]
async fn test_pitch_deck_requires_file() {
    let node = TestNode::new().await;
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "business"),
            ("entryType", "pitch-deck"),
            ("title", "Seed round deck"),
            ("paymentIntentId", "pi_deck"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "missing_file");
}

#[tokio::test]
async fn test_wrong_file_type_rejected() {
    let node = TestNode::new().await;
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "business"),
            ("entryType", "pitch-deck"),
            ("title", "Seed round deck"),
            ("paymentIntentId", "pi_deck"),
        ],
        Some(FilePart {
            file_name: "deck.png",
            content_type: "image/png",
            data: b"\x89PNG",
        }),
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "file_type_violation");
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let node = TestNode::new().await;
    let big = vec![b'a'; 4 * 1024 * 1024 + 1];
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "business"),
            ("entryType", "pitch-deck"),
            ("title", "Seed round deck"),
            ("paymentIntentId", "pi_deck"),
        ],
        Some(FilePart {
            file_name: "deck.pdf",
            content_type: "application/pdf",
            data: &big,
        }),
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "file_size_violation");
    assert!(node.store.is_empty().await);
}

#[tokio::test]
async fn test_replay_and_cross_owner_reuse() {
    let node = TestNode::new().await;
    let first_id = submit_text_entry(&node, "u1", "pi_once").await;

    let text = words(150);
    let resubmit = |user_id: &str| {
        multipart_request(multipart_body(
            &[
                ("userId", user_id),
                ("category", "technology"),
                ("entryType", "text"),
                ("title", "My Great Idea"),
                ("textContent", text.as_str()),
                ("paymentIntentId", "pi_once"),
            ],
            None,
        ))
    };

    let response = node.send(resubmit("u1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["entryId"], first_id);
    assert_eq!(json["replayed"], true);

    let response = node.send(resubmit("u2")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(node.store.len().await, 1);
    assert!(node.store.find_by_owner("u2").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_intent_is_lookup_error() {
    let node = TestNode::new().await;
    let text = words(150);
    let body = multipart_body(
        &[
            ("userId", "u1"),
            ("category", "technology"),
            ("entryType", "text"),
            ("title", "My Great Idea"),
            ("textContent", &text),
            ("paymentIntentId", "pi_never_created"),
        ],
        None,
    );
    let response = node.send(multipart_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "payment_lookup_error");
}

#[tokio::test]
async fn test_unavailable_without_store() {
    let app = create_app(AppState::new_for_test());
    let body = multipart_body(&[("userId", "u1")], None);
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_non_multipart_body_rejected() {
    let node = TestNode::new().await;
    let response = node
        .send(json_request(
            axum::http::Method::POST,
            "/api/entries",
            serde_json::json!({"userId": "u1"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorType"], "invalid_request");
}
