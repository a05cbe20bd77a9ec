// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for POST /api/entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryResponse {
    pub message: String,
    pub entry_id: Uuid,
    /// True when the payment intent had already been used by this owner
    pub replayed: bool,
}

/// Response for DELETE /api/entries/:id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteEntryResponse {
    pub message: String,
}
