// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payment intent issuance
//!
//! Computes the fee breakdown and registers a matching intent with the
//! provider. The breakdown travels as provider metadata so submission can
//! later read back exactly what was charged.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fees::FeeBreakdown;
use super::provider::PaymentProvider;
use super::types::{CreateIntentParams, PaymentError};
use crate::entries::{Category, EntryType, FieldError};

pub const METADATA_CATEGORY: &str = "category";
pub const METADATA_ENTRY_TYPE: &str = "entryType";

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(transparent)]
    InvalidField(#[from] FieldError),

    #[error("Failed to create payment intent: {0}")]
    Provider(#[from] PaymentError),

    #[error("Payment provider returned no client secret for {0}")]
    MissingClientSecret(String),
}

/// Result of a successful issuance
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedIntent {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub fees: FeeBreakdown,
}

pub struct PaymentIntentIssuer {
    provider: Arc<dyn PaymentProvider>,
    currency: String,
}

impl PaymentIntentIssuer {
    pub fn new(provider: Arc<dyn PaymentProvider>, currency: impl Into<String>) -> Self {
        Self {
            provider,
            currency: currency.into(),
        }
    }

    /// Compute fees and register an intent for their total
    pub async fn issue(
        &self,
        category: Option<&str>,
        entry_type: Option<&str>,
    ) -> Result<IssuedIntent, IssueError> {
        let missing: Vec<&'static str> = [("category", category), ("entryType", entry_type)]
            .into_iter()
            .filter(|(_, v)| v.map(|s| s.trim().is_empty()).unwrap_or(true))
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(IssueError::MissingFields(missing));
        }

        let category: Category = category.unwrap_or_default().parse()?;
        let entry_type: EntryType = entry_type.unwrap_or_default().parse()?;
        let fees = FeeBreakdown::for_category(category);

        let mut metadata = fees.to_metadata();
        metadata.insert(METADATA_CATEGORY.to_string(), category.to_string());
        metadata.insert(METADATA_ENTRY_TYPE.to_string(), entry_type.to_string());

        debug!(
            "Creating {} intent for {}/{}: {} {}",
            self.provider.name(),
            category,
            entry_type,
            fees.total_minor_units(),
            self.currency
        );

        let intent = self
            .provider
            .create_intent(CreateIntentParams {
                amount_minor: fees.total_minor_units(),
                currency: self.currency.clone(),
                metadata,
            })
            .await
            .map_err(|e| {
                warn!("Payment intent creation failed: {}", e);
                e
            })?;

        let client_secret = intent
            .client_secret
            .clone()
            .ok_or_else(|| IssueError::MissingClientSecret(intent.id.clone()))?;

        info!("Payment intent created: {}", intent.id);

        Ok(IssuedIntent {
            payment_intent_id: intent.id,
            client_secret,
            fees,
        })
    }
}
