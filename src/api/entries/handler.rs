// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Entry endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::debug;

use super::request::{read_submission, DeleteEntryRequest};
use super::response::{DeleteEntryResponse, SubmitEntryResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::entries::EntryView;
use crate::submission::{EntryRetrieval, SubmissionService};

/// POST /api/entries - Submit a paid entry
///
/// # Request
/// multipart/form-data with `userId`, `category`, `entryType`, `title`,
/// `paymentIntentId`, optional `description`, and per type `textContent`,
/// `videoUrl` or a `file` part (pdf, ppt, pptx).
///
/// # Response
/// - 201 Created with `entryId`
/// - 200 OK with `replayed: true` when the intent already backs an entry
///   of the same owner
///
/// # Errors
/// - 400 Bad Request: missing fields, validation violations, payment not
///   found or not completed
/// - 403 Forbidden: intent already used by another owner
/// - 500 Internal Server Error: entry could not be stored
/// - 503 Service Unavailable: store or provider not initialised
pub async fn submit_entry_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SubmitEntryResponse>), ApiError> {
    let multipart = multipart.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let store = state.entry_store().await?;
    let provider = state.payment_provider().await?;

    let (candidate, file) = read_submission(multipart, state.config.max_upload_bytes).await?;
    debug!(
        "Entry submission: type={:?} file={}",
        candidate.entry_type,
        file.as_ref().map(|f| f.size()).unwrap_or(0)
    );

    let service = SubmissionService::new(store, provider, state.validator());
    let outcome = service.submit(candidate, file).await?;

    let status = if outcome.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(SubmitEntryResponse {
            message: "Entry submitted successfully".to_string(),
            entry_id: outcome.entry_id,
            replayed: outcome.replayed,
        }),
    ))
}

/// GET /api/entries/:userId - Entries of one owner, newest first
pub async fn list_entries_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    let store = state.entry_store().await?;
    let entries = EntryRetrieval::new(store).list(&user_id).await?;

    debug!("Listed {} entries", entries.len());
    Ok(Json(entries))
}

/// DELETE /api/entries/:id - Delete an entry on behalf of its owner
///
/// # Request
/// JSON `{ "userId": "..." }`
///
/// # Errors
/// - 400 Bad Request: no `userId`
/// - 403 Forbidden: `userId` is not the owner
/// - 404 Not Found: unknown or malformed id
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<DeleteEntryRequest>, JsonRejection>,
) -> Result<Json<DeleteEntryResponse>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let store = state.entry_store().await?;
    EntryRetrieval::new(store)
        .delete(&id, request.user_id.as_deref())
        .await?;

    Ok(Json(DeleteEntryResponse {
        message: "Entry deleted successfully".to_string(),
    }))
}
