// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payment provider trait definition

use async_trait::async_trait;

use super::types::{CreateIntentParams, PaymentError, PaymentIntent};

/// Trait for implementing payment providers
///
/// The node never collects card details itself. It registers an intent
/// with the provider, hands the client secret to the browser, and later
/// asks the provider whether the intent succeeded.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Register a new payment intent
    async fn create_intent(&self, params: CreateIntentParams)
        -> Result<PaymentIntent, PaymentError>;

    /// Look up an existing payment intent by id
    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Whether the provider has what it needs (API key, etc.)
    fn is_available(&self) -> bool;
}
