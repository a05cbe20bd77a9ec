// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Entry submission workflow
//!
//! intake -> content presence -> validation -> payment verification ->
//! fee reconciliation -> persist. Any failing step rejects the submission
//! and nothing is written.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::SubmissionError;
use crate::entries::{
    Category, Entry, EntryCandidate, EntryContent, EntryType, EntryValidator, PaymentStatus,
    ReviewStatus, StoredFile, UploadedFile, Violation,
};
use crate::payments::{FeeBreakdown, IntentStatus, PaymentError, PaymentProvider};
use crate::storage::{EntryStore, StorageError};

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub entry_id: Uuid,
    /// The payment intent was already used by this owner; the earlier
    /// entry is returned unchanged
    pub replayed: bool,
}

pub struct SubmissionService {
    store: Arc<dyn EntryStore>,
    provider: Arc<dyn PaymentProvider>,
    validator: EntryValidator,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn EntryStore>,
        provider: Arc<dyn PaymentProvider>,
        validator: EntryValidator,
    ) -> Self {
        Self {
            store,
            provider,
            validator,
        }
    }

    pub async fn submit(
        &self,
        candidate: EntryCandidate,
        file: Option<UploadedFile>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let missing = candidate.missing_required_fields();
        if !missing.is_empty() {
            return Err(SubmissionError::MissingFields(missing));
        }

        if candidate.entry_type.as_deref() == Some(EntryType::PitchDeck.as_str()) && file.is_none()
        {
            return Err(SubmissionError::MissingFile);
        }

        let violations = self.validator.validate(&candidate, file.as_ref());
        if !violations.is_empty() {
            debug!("Submission rejected with {} violations", violations.len());
            return Err(SubmissionError::Validation(violations));
        }

        let payment_intent_id = candidate.payment_intent_id.clone().unwrap_or_default();
        let fees = self.verify_payment(&payment_intent_id).await?;

        let entry = build_entry(candidate, file, fees)?;
        let user_id = entry.user_id.clone();

        match self.store.insert(entry).await {
            Ok(entry) => {
                info!(
                    "Entry {} created for payment intent {}",
                    entry.id, entry.payment_intent_id
                );
                Ok(SubmissionOutcome {
                    entry_id: entry.id,
                    replayed: false,
                })
            }
            Err(StorageError::Duplicate { existing, .. }) if existing.is_owned_by(&user_id) => {
                info!(
                    "Replayed submission for payment intent {}, returning entry {}",
                    payment_intent_id, existing.id
                );
                Ok(SubmissionOutcome {
                    entry_id: existing.id,
                    replayed: true,
                })
            }
            Err(StorageError::Duplicate { .. }) => {
                warn!(
                    "Payment intent {} is already attached to another owner's entry",
                    payment_intent_id
                );
                Err(SubmissionError::Forbidden)
            }
            Err(e) => {
                warn!("Failed to persist entry: {}", e);
                Err(SubmissionError::Persistence(e))
            }
        }
    }

    /// Confirm the intent succeeded and read back what it charged
    async fn verify_payment(&self, payment_intent_id: &str) -> Result<FeeBreakdown, SubmissionError> {
        let intent = self
            .provider
            .retrieve_intent(payment_intent_id)
            .await
            .map_err(|e| {
                warn!("Payment lookup failed for {}: {}", payment_intent_id, e);
                match e {
                    PaymentError::NotFound { .. } => {
                        SubmissionError::PaymentLookup("Payment intent not found".to_string())
                    }
                    other => SubmissionError::PaymentLookup(other.provider_message()),
                }
            })?;

        if intent.status != IntentStatus::Succeeded {
            debug!(
                "Payment intent {} not completed: {}",
                payment_intent_id, intent.status
            );
            return Err(SubmissionError::PaymentIncomplete {
                status: intent.status,
            });
        }

        let fees = FeeBreakdown::from_metadata(&intent.metadata)
            .map_err(|e| SubmissionError::PaymentLookup(e.to_string()))?;

        if fees.total_minor_units() != intent.amount {
            warn!(
                "Payment intent {} amount {} does not match recorded fees {}",
                payment_intent_id,
                intent.amount,
                fees.total_minor_units()
            );
            return Err(SubmissionError::PaymentLookup(
                "Payment amount does not match the recorded fees".to_string(),
            ));
        }

        Ok(fees)
    }
}

fn build_entry(
    candidate: EntryCandidate,
    file: Option<UploadedFile>,
    fees: FeeBreakdown,
) -> Result<Entry, SubmissionError> {
    let category: Category = candidate
        .category
        .unwrap_or_default()
        .parse()
        .map_err(|e| SubmissionError::Validation(vec![Violation::from(e)]))?;
    let entry_type: EntryType = candidate
        .entry_type
        .unwrap_or_default()
        .parse()
        .map_err(|e| SubmissionError::Validation(vec![Violation::from(e)]))?;

    let content = match entry_type {
        EntryType::Text => EntryContent::Text {
            text_content: candidate.text_content.unwrap_or_default(),
        },
        EntryType::Video => EntryContent::Video {
            video_url: candidate.video_url.unwrap_or_default(),
        },
        EntryType::PitchDeck => {
            let file = file.ok_or(SubmissionError::MissingFile)?;
            EntryContent::PitchDeck {
                file: StoredFile {
                    file_data: BASE64.encode(&file.data),
                    file_size: file.size(),
                    file_name: file.file_name,
                    file_type: file.content_type,
                },
            }
        }
    };

    Ok(Entry {
        id: Uuid::new_v4(),
        user_id: candidate.user_id.unwrap_or_default(),
        category,
        title: candidate.title.unwrap_or_default(),
        description: candidate.description.filter(|d| !d.trim().is_empty()),
        content,
        entry_fee: fees.entry_fee,
        stripe_fee: fees.stripe_fee,
        total_amount: fees.total_amount,
        payment_intent_id: candidate.payment_intent_id.unwrap_or_default(),
        payment_status: PaymentStatus::Succeeded,
        status: ReviewStatus::Submitted,
        submission_date: Utc::now(),
    })
}
