// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod entries;
pub mod payments;
pub mod storage;
pub mod submission;
pub mod version;

// Re-export main types
pub use api::{create_app, AppState};
pub use config::ServerConfig;
pub use entries::{Category, Entry, EntryContent, EntryType, EntryValidator, Violation};
pub use payments::{
    calculate_fees, entry_fee, FeeBreakdown, MockPaymentProvider, PaymentIntentIssuer,
    PaymentProvider, PaymentReconciler, StripeProvider, WebhookVerifier,
};
pub use storage::{EntryStore, FileEntryStore, InMemoryEntryStore, StorageError};
pub use submission::{EntryRetrieval, SubmissionError, SubmissionService};
