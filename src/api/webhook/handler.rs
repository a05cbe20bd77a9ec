// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::payments::webhook::SIGNATURE_HEADER;
use crate::payments::{PaymentReconciler, ReconcileOutcome, WebhookVerifier};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/webhook - Signed provider events
///
/// # Errors
/// - 400 Bad Request: signature missing, stale or wrong
/// - 503 Service Unavailable: no webhook secret configured or store missing
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let secret = state
        .config
        .payment
        .stripe_webhook_secret
        .as_deref()
        .ok_or_else(|| {
            ApiError::ServiceUnavailable("Webhook secret not configured".to_string())
        })?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let event = WebhookVerifier::new(secret)
        .verify(&body, signature, Utc::now().timestamp())
        .map_err(|e| {
            warn!("Webhook rejected: {}", e);
            ApiError::from(e)
        })?;

    let store = state.entry_store().await?;
    let outcome = PaymentReconciler::new(store).handle(&event).await?;

    if let ReconcileOutcome::MarkedFailed { payment_intent_id } = &outcome {
        info!("Webhook {}: entry for {} marked failed", event.id, payment_intent_id);
    }

    Ok(Json(WebhookAck { received: true }))
}
