// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ApiError;
use super::http_server::AppState;
use crate::entries::validation::{
    ALLOWED_FILE_TYPES, DESCRIPTION_MAX_CHARS, TEXT_MAX_WORDS, TEXT_MIN_WORDS, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};
use crate::entries::{Category, EntryType};
use crate::payments::FeeBreakdown;
use crate::version;

/// Hosts accepted for video entries
pub const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Version, build tag, date and feature list
    pub version: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub entry_store: ComponentStatus,
    pub payment_provider: ComponentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFees {
    pub category: Category,
    #[serde(flatten)]
    pub fees: FeeBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRulesResponse {
    pub title_min_chars: usize,
    pub title_max_chars: usize,
    pub description_max_chars: usize,
    pub text_min_words: usize,
    pub text_max_words: usize,
    pub max_file_bytes: u64,
    pub allowed_file_types: Vec<String>,
    pub video_hosts: Vec<String>,
    pub entry_types: Vec<EntryType>,
    pub categories: Vec<CategoryFees>,
}

/// GET / - API index
pub async fn index_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "competition-entry-node",
        "status": "running",
        "version": version::VERSION_NUMBER,
        "endpoints": [
            "GET /api/health",
            "GET /api/fees/:category",
            "GET /api/submission-rules",
            "POST /api/create-payment-intent",
            "POST /api/entries",
            "GET /api/entries/:userId",
            "DELETE /api/entries/:id",
            "GET /api/file/:paymentIntentId?userId=",
            "POST /api/webhook",
        ],
    }))
}

/// GET /api/health - Dependency readiness
///
/// Always 200; `status` is `degraded` while the store or provider is missing.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let entry_store = match state.entry_store.read().await.as_ref() {
        Some(store) => ComponentStatus {
            available: true,
            backend: Some(store.name().to_string()),
        },
        None => ComponentStatus {
            available: false,
            backend: None,
        },
    };

    let payment_provider = match state.payment_provider.read().await.as_ref() {
        Some(provider) => ComponentStatus {
            available: provider.is_available(),
            backend: Some(provider.name().to_string()),
        },
        None => ComponentStatus {
            available: false,
            backend: None,
        },
    };

    let status = if entry_store.available && payment_provider.available {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: version::get_version_info(),
        timestamp: Utc::now(),
        entry_store,
        payment_provider,
    })
}

/// GET /api/fees/:category - Fee preview without creating an intent
pub async fn fees_handler(Path(category): Path<String>) -> Result<Json<CategoryFees>, ApiError> {
    let category: Category = category.parse()?;
    Ok(Json(CategoryFees {
        category,
        fees: FeeBreakdown::for_category(category),
    }))
}

/// GET /api/submission-rules - Limits the client should enforce up front
pub async fn submission_rules_handler(
    State(state): State<AppState>,
) -> Json<SubmissionRulesResponse> {
    Json(SubmissionRulesResponse {
        title_min_chars: TITLE_MIN_CHARS,
        title_max_chars: TITLE_MAX_CHARS,
        description_max_chars: DESCRIPTION_MAX_CHARS,
        text_min_words: TEXT_MIN_WORDS,
        text_max_words: TEXT_MAX_WORDS,
        max_file_bytes: state.config.max_upload_bytes,
        allowed_file_types: ALLOWED_FILE_TYPES.iter().map(|t| t.to_string()).collect(),
        video_hosts: VIDEO_HOSTS.iter().map(|h| h.to_string()).collect(),
        entry_types: EntryType::ALL.to_vec(),
        categories: Category::ALL
            .iter()
            .map(|&category| CategoryFees {
                category,
                fees: FeeBreakdown::for_category(category),
            })
            .collect(),
    })
}
