// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::payments::IssuedIntent;

/// Response for POST /api/create-payment-intent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub entry_fee: u64,
    pub stripe_fee: u64,
    pub total_amount: u64,
}

impl From<IssuedIntent> for CreatePaymentIntentResponse {
    fn from(issued: IssuedIntent) -> Self {
        Self {
            client_secret: issued.client_secret,
            payment_intent_id: issued.payment_intent_id,
            entry_fee: issued.fees.entry_fee,
            stripe_fee: issued.fees.stripe_fee,
            total_amount: issued.fees.total_amount,
        }
    }
}
