// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for payment provider interaction

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Provider-side lifecycle of a payment intent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(other)]
    Unknown,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::RequiresAction => "requires_action",
            IntentStatus::Processing => "processing",
            IntentStatus::RequiresCapture => "requires_capture",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment intent as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret handed to the client to complete payment; only present on
    /// creation responses for some providers
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: IntentStatus,
    /// Amount in minor units
    pub amount: u64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Parameters for registering a new intent
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntentParams {
    /// Amount in minor units
    pub amount_minor: u64,
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

/// Errors that can occur talking to the payment provider
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The referenced intent does not exist
    #[error("Payment intent not found: {id}")]
    NotFound { id: String },

    /// Error reported by the provider API
    #[error("Payment provider error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request timed out
    #[error("Payment provider timeout after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Network-level failure
    #[error("Payment provider request failed: {0}")]
    Transport(String),

    /// Response could not be understood
    #[error("Invalid payment provider response: {0}")]
    InvalidResponse(String),

    /// Provider has no credentials
    #[error("No API key configured for {provider}")]
    NotConfigured { provider: String },
}

impl PaymentError {
    /// The message the provider gave, without our prefix
    pub fn provider_message(&self) -> String {
        match self {
            PaymentError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
