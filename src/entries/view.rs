// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Owner-facing projection of an entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Category, Entry, EntryContent, EntryType, PaymentStatus, ReviewStatus};

/// Entry as returned by listings. Pitch-deck bytes are never inlined;
/// `fileUrl` points at the download endpoint instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: Uuid,
    pub user_id: String,
    pub category: Category,
    pub entry_type: EntryType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub entry_fee: u64,
    pub stripe_fee: u64,
    pub total_amount: u64,
    pub payment_intent_id: String,
    pub payment_status: PaymentStatus,
    pub status: ReviewStatus,
    pub submission_date: DateTime<Utc>,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        let mut view = EntryView {
            id: entry.id,
            user_id: entry.user_id.clone(),
            category: entry.category,
            entry_type: entry.entry_type(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            text_content: None,
            video_url: None,
            file_name: None,
            file_type: None,
            file_size: None,
            file_url: entry.file_url(),
            entry_fee: entry.entry_fee,
            stripe_fee: entry.stripe_fee,
            total_amount: entry.total_amount,
            payment_intent_id: entry.payment_intent_id.clone(),
            payment_status: entry.payment_status,
            status: entry.status,
            submission_date: entry.submission_date,
        };

        match &entry.content {
            EntryContent::Text { text_content } => view.text_content = Some(text_content.clone()),
            EntryContent::Video { video_url } => view.video_url = Some(video_url.clone()),
            EntryContent::PitchDeck { file } => {
                view.file_name = Some(file.file_name.clone());
                view.file_type = Some(file.file_type.clone());
                view.file_size = Some(file.file_size);
            }
        }

        view
    }
}
