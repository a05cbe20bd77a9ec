// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod entries;
pub mod errors;
pub mod files;
pub mod handlers;
pub mod http_server;
pub mod payment_intent;
pub mod webhook;

pub use entries::{
    delete_entry_handler, list_entries_handler, submit_entry_handler, DeleteEntryRequest,
    SubmitEntryResponse,
};
pub use errors::{ApiError, ErrorResponse};
pub use files::download_file_handler;
pub use handlers::{HealthResponse, SubmissionRulesResponse};
pub use http_server::{create_app, start_server, AppState};
pub use payment_intent::{
    create_payment_intent_handler, CreatePaymentIntentRequest, CreatePaymentIntentResponse,
};
pub use webhook::{webhook_handler, WebhookAck};
