// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::error;

use crate::entries::{FieldError, Violation};
use crate::payments::{IntentStatus, IssueError, WebhookError};
use crate::storage::StorageError;
use crate::submission::SubmissionError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    MissingFields(Vec<String>),
    /// One or more structural violations; never empty
    Validation(Vec<Violation>),
    MissingFile,
    /// Request body exceeded the upload cap before it could be inspected
    UploadTooLarge {
        max: u64,
    },
    PaymentProvider(String),
    PaymentLookup(String),
    PaymentIncomplete {
        status: IntentStatus,
    },
    Persistence(String),
    NotFound(String),
    RouteNotFound {
        path: String,
    },
    Forbidden(String),
    WebhookAuth(String),
    ServiceUnavailable(String),
    InvalidRequest(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::MissingFields(fields) => {
                let mut details = HashMap::new();
                details.insert("fields".to_string(), serde_json::json!(fields));
                (
                    "missing_field",
                    format!("Missing required fields: {}", fields.join(", ")),
                    Some(details),
                )
            }
            ApiError::Validation(violations) => {
                let error_type = violations
                    .first()
                    .map(|v| v.kind())
                    .unwrap_or("invalid_request");
                let message = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                let mut details = HashMap::new();
                details.insert(
                    "violations".to_string(),
                    serde_json::Value::Array(
                        violations
                            .iter()
                            .map(|v| {
                                serde_json::json!({
                                    "kind": v.kind(),
                                    "field": v.field(),
                                    "message": v.to_string(),
                                })
                            })
                            .collect(),
                    ),
                );
                (error_type, message, Some(details))
            }
            ApiError::MissingFile => (
                "missing_file",
                "File required for pitch-deck entries".to_string(),
                None,
            ),
            ApiError::UploadTooLarge { max } => {
                let mut details = HashMap::new();
                details.insert(
                    "maxBytes".to_string(),
                    serde_json::Value::Number((*max).into()),
                );
                (
                    "file_size_violation",
                    format!("Upload exceeds the {} byte limit", max),
                    Some(details),
                )
            }
            ApiError::PaymentProvider(msg) => ("payment_provider_error", msg.clone(), None),
            ApiError::PaymentLookup(msg) => ("payment_lookup_error", msg.clone(), None),
            ApiError::PaymentIncomplete { status } => {
                let mut details = HashMap::new();
                details.insert(
                    "status".to_string(),
                    serde_json::Value::String(status.to_string()),
                );
                (
                    "payment_incomplete",
                    "Payment not completed".to_string(),
                    Some(details),
                )
            }
            ApiError::Persistence(msg) => ("persistence_error", msg.clone(), None),
            ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
            ApiError::RouteNotFound { path } => {
                let mut details = HashMap::new();
                details.insert(
                    "path".to_string(),
                    serde_json::Value::String(path.clone()),
                );
                ("not_found", "Route not found".to_string(), Some(details))
            }
            ApiError::Forbidden(msg) => ("forbidden", msg.clone(), None),
            ApiError::WebhookAuth(msg) => ("webhook_auth_error", msg.clone(), None),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone(), None),
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingFields(_)
            | ApiError::Validation(_)
            | ApiError::MissingFile
            | ApiError::UploadTooLarge { .. }
            | ApiError::PaymentLookup(_)
            | ApiError::PaymentIncomplete { .. }
            | ApiError::WebhookAuth(_)
            | ApiError::InvalidRequest(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) | ApiError::RouteNotFound { .. } => 404,
            ApiError::PaymentProvider(_)
            | ApiError::Persistence(_)
            | ApiError::InternalError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            ApiError::Validation(violations) => {
                write!(f, "Validation failed with {} violation(s)", violations.len())
            }
            ApiError::MissingFile => write!(f, "File required for pitch-deck entries"),
            ApiError::UploadTooLarge { max } => write!(f, "Upload exceeds the {} byte limit", max),
            ApiError::PaymentProvider(msg) => write!(f, "Payment provider error: {}", msg),
            ApiError::PaymentLookup(msg) => write!(f, "Payment lookup error: {}", msg),
            ApiError::PaymentIncomplete { status } => {
                write!(f, "Payment not completed (status: {})", status)
            }
            ApiError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::RouteNotFound { path } => write!(f, "Route not found: {}", path),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::WebhookAuth(msg) => write!(f, "Webhook error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::MissingFields(fields) => {
                ApiError::MissingFields(fields.into_iter().map(String::from).collect())
            }
            SubmissionError::MissingFile => ApiError::MissingFile,
            SubmissionError::Validation(violations) => ApiError::Validation(violations),
            SubmissionError::PaymentLookup(msg) => ApiError::PaymentLookup(msg),
            SubmissionError::PaymentIncomplete { status } => ApiError::PaymentIncomplete { status },
            SubmissionError::Persistence(e) => e.into(),
            SubmissionError::Forbidden => {
                ApiError::Forbidden("Not authorized to modify this entry".to_string())
            }
            SubmissionError::NotFound => ApiError::NotFound("Entry not found".to_string()),
            SubmissionError::CorruptFile(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<IssueError> for ApiError {
    fn from(e: IssueError) -> Self {
        match e {
            IssueError::MissingFields(fields) => {
                ApiError::MissingFields(fields.into_iter().map(String::from).collect())
            }
            IssueError::InvalidField(field) => field.into(),
            IssueError::Provider(e) => ApiError::PaymentProvider(e.provider_message()),
            e @ IssueError::MissingClientSecret(_) => ApiError::PaymentProvider(e.to_string()),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(e: FieldError) -> Self {
        ApiError::Validation(vec![Violation::from(e)])
    }
}

impl From<WebhookError> for ApiError {
    fn from(e: WebhookError) -> Self {
        ApiError::WebhookAuth(e.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Persistence(e.to_string())
    }
}
