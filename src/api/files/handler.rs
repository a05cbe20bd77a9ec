// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::submission::{EntryFile, EntryRetrieval};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// GET /api/file/:paymentIntentId?userId= - Download a pitch deck
///
/// Entries not owned by `userId` are reported as 404.
pub async fn download_file_handler(
    State(state): State<AppState>,
    Path(payment_intent_id): Path<String>,
    Query(query): Query<FileQuery>,
) -> Result<Response, ApiError> {
    let user_id = match query.user_id.as_deref() {
        Some(u) if !u.trim().is_empty() => u.to_string(),
        _ => return Err(ApiError::MissingFields(vec!["userId".to_string()])),
    };

    let store = state.entry_store().await?;
    let file = EntryRetrieval::new(store)
        .fetch_file(&payment_intent_id, &user_id)
        .await?;

    debug!(
        "Serving {} bytes for payment intent {}",
        file.data.len(),
        payment_intent_id
    );
    Ok(file_response(file))
}

fn file_response(file: EntryFile) -> Response {
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        sanitize_filename(&file.file_name)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.data,
    )
        .into_response()
}

/// Keep the filename printable and free of quoting characters
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .filter(|c| !matches!(c, '"' | '\\' | '/'))
        .collect();
    if cleaned.trim().is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}
