// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payment provider webhook endpoint
//!
//! Provides `POST /api/webhook`. The body must be read raw: the signature
//! covers the exact bytes sent.

pub mod handler;

pub use handler::{webhook_handler, WebhookAck};
