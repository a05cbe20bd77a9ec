// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use std::cmp::Ordering;
use thiserror::Error;
use uuid::Uuid;

use crate::entries::validation::{TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::entries::Entry;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("An entry for payment intent {payment_intent_id} already exists")]
    Duplicate {
        payment_intent_id: String,
        existing: Box<Entry>,
    },

    #[error("Entry rejected by schema: {0}")]
    SchemaViolation(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Entry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for entry storage backends
///
/// Implementations must enforce `paymentIntentId` uniqueness atomically
/// with the insert itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persist a new entry and return it as stored
    async fn insert(&self, entry: Entry) -> Result<Entry, StorageError>;

    /// All entries of one owner, newest first
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Entry>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, StorageError>;

    async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Entry>, StorageError>;

    /// Hard delete; returns whether an entry was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;

    /// Move a succeeded entry to failed. Returns whether any entry
    /// references the intent.
    async fn mark_payment_failed(&self, payment_intent_id: &str) -> Result<bool, StorageError>;

    /// Backend name for logging and health output
    fn name(&self) -> &'static str;
}

/// Record-level rules every backend re-checks before writing
pub fn check_schema(entry: &Entry) -> Result<(), StorageError> {
    if entry.user_id.trim().is_empty() {
        return Err(StorageError::SchemaViolation("userId is empty".to_string()));
    }
    if entry.payment_intent_id.trim().is_empty() {
        return Err(StorageError::SchemaViolation(
            "paymentIntentId is empty".to_string(),
        ));
    }

    let title_chars = entry.title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_chars) {
        return Err(StorageError::SchemaViolation(format!(
            "title has {} characters",
            title_chars
        )));
    }

    if entry.entry_fee.checked_add(entry.stripe_fee) != Some(entry.total_amount) {
        return Err(StorageError::SchemaViolation(format!(
            "totalAmount {} != entryFee {} + stripeFee {}",
            entry.total_amount, entry.entry_fee, entry.stripe_fee
        )));
    }

    Ok(())
}

/// Newest submission first; ties fall back to id so the order is stable
pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    b.submission_date
        .cmp(&a.submission_date)
        .then_with(|| a.id.cmp(&b.id))
}
