// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Entry endpoints
//!
//! Provides submission (`POST /api/entries`), owner listing
//! (`GET /api/entries/:userId`) and deletion (`DELETE /api/entries/:id`).

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{delete_entry_handler, list_entries_handler, submit_entry_handler};
pub use request::{read_submission, DeleteEntryRequest};
pub use response::{DeleteEntryResponse, SubmitEntryResponse};
