// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pitch-deck download endpoint
//!
//! Provides `GET /api/file/:paymentIntentId?userId=`.

pub mod handler;

pub use handler::{download_file_handler, FileQuery};
