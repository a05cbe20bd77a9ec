// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Entry fee calculation
//!
//! Amounts are whole currency units. The processing surcharge is 4% of the
//! entry fee rounded up, so the collected total always covers it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::entries::Category;

/// Surcharge rate in percent
pub const SURCHARGE_PERCENT: u64 = 4;

/// Minor units per currency unit (cents)
pub const MINOR_UNITS: u64 = 100;

pub const METADATA_ENTRY_FEE: &str = "entryFee";
pub const METADATA_STRIPE_FEE: &str = "stripeFee";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeeError {
    #[error("Payment intent metadata is missing '{0}'")]
    MissingMetadata(&'static str),

    #[error("Payment intent metadata '{key}' is not a whole amount: '{value}'")]
    InvalidMetadata { key: &'static str, value: String },
}

/// Fee breakdown for one entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub entry_fee: u64,
    pub stripe_fee: u64,
    pub total_amount: u64,
}

impl FeeBreakdown {
    /// Breakdown for a category's base fee
    pub fn for_category(category: Category) -> Self {
        calculate_fees(entry_fee(category))
    }

    /// Total expressed in minor units, as the payment provider expects
    pub fn total_minor_units(&self) -> u64 {
        self.total_amount.saturating_mul(MINOR_UNITS)
    }

    /// Encode the fee components as provider metadata
    pub fn to_metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            (METADATA_ENTRY_FEE.to_string(), self.entry_fee.to_string()),
            (METADATA_STRIPE_FEE.to_string(), self.stripe_fee.to_string()),
        ])
    }

    /// Recover the breakdown recorded on the provider side. The total is
    /// recomputed from the two components.
    pub fn from_metadata(metadata: &HashMap<String, String>) -> Result<Self, FeeError> {
        let entry_fee = parse_amount(metadata, METADATA_ENTRY_FEE)?;
        let stripe_fee = parse_amount(metadata, METADATA_STRIPE_FEE)?;

        // The total must stay representable in minor units
        let total_amount = entry_fee
            .checked_add(stripe_fee)
            .filter(|total| total.checked_mul(MINOR_UNITS).is_some())
            .ok_or_else(|| FeeError::InvalidMetadata {
                key: METADATA_STRIPE_FEE,
                value: stripe_fee.to_string(),
            })?;

        Ok(Self {
            entry_fee,
            stripe_fee,
            total_amount,
        })
    }
}

/// Base fee per category
pub fn entry_fee(category: Category) -> u64 {
    match category {
        Category::Business => 49,
        Category::Creative => 49,
        Category::Technology => 99,
        Category::SocialImpact => 49,
    }
}

/// Surcharge (rounded up) and total for a base fee
pub fn calculate_fees(entry_fee: u64) -> FeeBreakdown {
    let stripe_fee = (entry_fee * SURCHARGE_PERCENT).div_ceil(100);
    FeeBreakdown {
        entry_fee,
        stripe_fee,
        total_amount: entry_fee + stripe_fee,
    }
}

fn parse_amount(metadata: &HashMap<String, String>, key: &'static str) -> Result<u64, FeeError> {
    let value = metadata.get(key).ok_or(FeeError::MissingMetadata(key))?;
    value.trim().parse::<u64>().map_err(|_| FeeError::InvalidMetadata {
        key,
        value: value.clone(),
    })
}
