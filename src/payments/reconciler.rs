// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Applies verified provider events to stored entries

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::webhook::{WebhookEvent, PAYMENT_FAILED_EVENT};
use crate::storage::{EntryStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// An entry's payment was marked failed
    MarkedFailed { payment_intent_id: String },
    /// Failure event for an intent no entry references
    UnknownIntent { payment_intent_id: String },
    /// Event type this node does not act on
    Ignored { event_type: String },
}

pub struct PaymentReconciler {
    store: Arc<dyn EntryStore>,
}

impl PaymentReconciler {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, event: &WebhookEvent) -> Result<ReconcileOutcome, StorageError> {
        if event.event_type != PAYMENT_FAILED_EVENT {
            debug!("Ignoring webhook event {} ({})", event.id, event.event_type);
            return Ok(ReconcileOutcome::Ignored {
                event_type: event.event_type.clone(),
            });
        }

        let payment_intent_id = event.data.object.id.clone();
        let matched = self
            .store
            .mark_payment_failed(&payment_intent_id)
            .await
            .map_err(|e| {
                warn!(
                    "Failed to record payment failure for {}: {}",
                    payment_intent_id, e
                );
                e
            })?;

        if matched {
            info!("Payment failed for intent {}", payment_intent_id);
            Ok(ReconcileOutcome::MarkedFailed { payment_intent_id })
        } else {
            debug!("Payment failure for unknown intent {}", payment_intent_id);
            Ok(ReconcileOutcome::UnknownIntent { payment_intent_id })
        }
    }
}
