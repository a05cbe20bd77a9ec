// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fees, payment intents and provider webhooks

pub mod fees;
pub mod issuer;
pub mod mock;
pub mod provider;
pub mod reconciler;
pub mod stripe;
pub mod types;
pub mod webhook;

// Re-export main types at top level
pub use fees::{calculate_fees, entry_fee, FeeBreakdown, FeeError};
pub use issuer::{IssueError, IssuedIntent, PaymentIntentIssuer};
pub use mock::MockPaymentProvider;
pub use provider::PaymentProvider;
pub use reconciler::{PaymentReconciler, ReconcileOutcome};
pub use stripe::StripeProvider;
pub use types::{CreateIntentParams, IntentStatus, PaymentError, PaymentIntent};
pub use webhook::{WebhookError, WebhookEvent, WebhookVerifier};
