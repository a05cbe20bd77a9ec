// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for competition entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when parsing enumerated entry fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid category '{0}', valid categories: business, creative, technology, social-impact")]
    InvalidCategory(String),

    #[error("Invalid entry type '{0}', valid types: text, pitch-deck, video")]
    InvalidEntryType(String),
}

/// Competition category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Business,
    Creative,
    Technology,
    SocialImpact,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Business,
        Category::Creative,
        Category::Technology,
        Category::SocialImpact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Creative => "creative",
            Category::Technology => "technology",
            Category::SocialImpact => "social-impact",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FieldError::InvalidCategory(s.to_string()))
    }
}

/// Entry format chosen by the submitter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    Text,
    PitchDeck,
    Video,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Text, EntryType::PitchDeck, EntryType::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Text => "text",
            EntryType::PitchDeck => "pitch-deck",
            EntryType::Video => "video",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FieldError::InvalidEntryType(s.to_string()))
    }
}

/// Payment state of the intent backing an entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

/// Review label, mutated out of band by reviewers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    #[default]
    Submitted,
    UnderReview,
    Finalist,
    Winner,
    Rejected,
}

/// An uploaded pitch deck as it is persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Base64-encoded file bytes
    pub file_data: String,
    pub file_name: String,
    /// MIME type reported at upload
    pub file_type: String,
    /// Decoded size in bytes
    pub file_size: u64,
}

/// Entry payload; the tag doubles as the entry type so a record can only
/// ever carry the content that matches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entryType", rename_all = "kebab-case")]
pub enum EntryContent {
    #[serde(rename_all = "camelCase")]
    Text { text_content: String },

    #[serde(rename_all = "camelCase")]
    PitchDeck {
        #[serde(flatten)]
        file: StoredFile,
    },

    #[serde(rename_all = "camelCase")]
    Video { video_url: String },
}

impl EntryContent {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryContent::Text { .. } => EntryType::Text,
            EntryContent::PitchDeck { .. } => EntryType::PitchDeck,
            EntryContent::Video { .. } => EntryType::Video,
        }
    }
}

/// The durable record of one submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub user_id: String,
    pub category: Category,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub content: EntryContent,
    pub entry_fee: u64,
    pub stripe_fee: u64,
    pub total_amount: u64,
    pub payment_intent_id: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub status: ReviewStatus,
    pub submission_date: DateTime<Utc>,
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        self.content.entry_type()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Download reference for pitch decks, derived at read time
    pub fn file_url(&self) -> Option<String> {
        match self.content {
            EntryContent::PitchDeck { .. } => Some(file_url_for(
                &self.payment_intent_id,
                &self.user_id,
            )),
            _ => None,
        }
    }
}

/// Builds the owner-scoped download path for a pitch deck
pub fn file_url_for(payment_intent_id: &str, user_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(user_id.as_bytes()).collect();
    format!("/api/file/{}?userId={}", payment_intent_id, encoded)
}
