// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::entries::{EntryCandidate, UploadedFile};

/// Multipart field carrying the pitch deck
pub const FILE_FIELD: &str = "file";

/// Request body for DELETE /api/entries/:id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Drain a multipart submission into a candidate and optional file.
/// Unknown fields are ignored; a repeated field keeps its last value.
pub async fn read_submission(
    mut multipart: Multipart,
    max_upload_bytes: u64,
) -> Result<(EntryCandidate, Option<UploadedFile>), ApiError> {
    let mut candidate = EntryCandidate::default();
    let mut file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(multipart_error(e.status(), e.body_text(), max_upload_bytes)),
        };

        let name = field.name().unwrap_or_default().to_string();

        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e.status(), e.body_text(), max_upload_bytes))?;

            // Browsers send an empty part when no file was chosen
            if !data.is_empty() {
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text(), max_upload_bytes))?;

        let slot = match name.as_str() {
            "userId" => &mut candidate.user_id,
            "category" => &mut candidate.category,
            "entryType" => &mut candidate.entry_type,
            "title" => &mut candidate.title,
            "description" => &mut candidate.description,
            "textContent" => &mut candidate.text_content,
            "videoUrl" => &mut candidate.video_url,
            "paymentIntentId" => &mut candidate.payment_intent_id,
            _ => continue,
        };
        *slot = Some(value);
    }

    Ok((candidate, file))
}

fn multipart_error(status: StatusCode, body: String, max_upload_bytes: u64) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::UploadTooLarge {
            max: max_upload_bytes,
        }
    } else {
        ApiError::InvalidRequest(body)
    }
}
