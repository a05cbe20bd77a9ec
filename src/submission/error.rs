// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use crate::entries::Violation;
use crate::payments::IntentStatus;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("File required for pitch-deck entries")]
    MissingFile,

    #[error("Entry failed validation: {}", summarize(.0))]
    Validation(Vec<Violation>),

    #[error("Could not verify payment: {0}")]
    PaymentLookup(String),

    #[error("Payment not completed (status: {status})")]
    PaymentIncomplete { status: IntentStatus },

    #[error("Failed to save entry: {0}")]
    Persistence(#[from] StorageError),

    #[error("Not authorized to modify this entry")]
    Forbidden,

    #[error("Entry not found")]
    NotFound,

    #[error("Stored file is unreadable: {0}")]
    CorruptFile(String),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
