// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payment intent endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::debug;

use super::request::CreatePaymentIntentRequest;
use super::response::CreatePaymentIntentResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::payments::PaymentIntentIssuer;

/// POST /api/create-payment-intent - Compute fees and open a payment intent
///
/// # Request
/// - `category`: business | creative | technology | social-impact
/// - `entryType`: text | pitch-deck | video
///
/// # Response
/// - `clientSecret`, `paymentIntentId`
/// - `entryFee`, `stripeFee`, `totalAmount` in whole currency units
///
/// # Errors
/// - 400 Bad Request: missing field, invalid category or entry type
/// - 500 Internal Server Error: payment provider failure
/// - 503 Service Unavailable: payment provider not initialised
pub async fn create_payment_intent_handler(
    State(state): State<AppState>,
    request: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    debug!(
        "Payment intent request: {:?}/{:?}",
        request.category, request.entry_type
    );

    let provider = state.payment_provider().await?;
    let issuer = PaymentIntentIssuer::new(provider, state.config.payment.currency.clone());

    let issued = issuer
        .issue(request.category.as_deref(), request.entry_type.as_deref())
        .await?;

    Ok(Json(issued.into()))
}
