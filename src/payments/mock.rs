// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory payment provider for local development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::provider::PaymentProvider;
use super::types::{CreateIntentParams, IntentStatus, PaymentError, PaymentIntent};

/// Payment provider that keeps intents in memory. Intents start in
/// `requires_payment_method`; tests move them along with [`set_status`].
///
/// [`set_status`]: MockPaymentProvider::set_status
#[derive(Clone, Default)]
pub struct MockPaymentProvider {
    intents: Arc<RwLock<HashMap<String, PaymentIntent>>>,
    next_id: Arc<AtomicU64>,
    failure: Arc<RwLock<Option<String>>>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an intent directly, e.g. one that already succeeded
    pub async fn insert_intent(&self, intent: PaymentIntent) {
        self.intents.write().await.insert(intent.id.clone(), intent);
    }

    /// Move an existing intent to a new status
    pub async fn set_status(&self, id: &str, status: IntentStatus) -> bool {
        match self.intents.write().await.get_mut(id) {
            Some(intent) => {
                intent.status = status;
                true
            }
            None => false,
        }
    }

    /// Make every subsequent call fail with a provider error
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    pub async fn intent_count(&self) -> usize {
        self.intents.read().await.len()
    }

    async fn check_failure(&self) -> Result<(), PaymentError> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(PaymentError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_intent(
        &self,
        params: CreateIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        self.check_failure().await?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("pi_mock_{}", n);
        let intent = PaymentIntent {
            client_secret: Some(format!("{}_secret_{}", id, n)),
            id: id.clone(),
            status: IntentStatus::RequiresPaymentMethod,
            amount: params.amount_minor,
            currency: params.currency,
            metadata: params.metadata,
        };

        self.intents.write().await.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        self.check_failure().await?;

        self.intents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| PaymentError::NotFound { id: id.to_string() })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}
