// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Raw submission fields as received from the client

use bytes::Bytes;

/// Candidate entry before validation; every field is optional because it
/// arrives as loosely-typed form data.
#[derive(Debug, Clone, Default)]
pub struct EntryCandidate {
    pub user_id: Option<String>,
    pub category: Option<String>,
    pub entry_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub text_content: Option<String>,
    pub video_url: Option<String>,
    pub payment_intent_id: Option<String>,
}

impl EntryCandidate {
    /// Fields that must be present before anything else is looked at
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("userId", &self.user_id),
            ("category", &self.category),
            ("entryType", &self.entry_type),
            ("title", &self.title),
            ("paymentIntentId", &self.payment_intent_id),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }
}

/// An uploaded file held fully in memory
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}
