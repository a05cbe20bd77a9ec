// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Owner-scoped reads and deletes

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::SubmissionError;
use crate::entries::{EntryContent, EntryView};
use crate::storage::EntryStore;

/// Decoded pitch-deck payload ready to stream back
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub struct EntryRetrieval {
    store: Arc<dyn EntryStore>,
}

impl EntryRetrieval {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Entries owned by `user_id`, newest first
    pub async fn list(&self, user_id: &str) -> Result<Vec<EntryView>, SubmissionError> {
        let entries = self.store.find_by_owner(user_id).await?;
        Ok(entries.iter().map(EntryView::from).collect())
    }

    /// Delete an entry on behalf of its claimed owner
    pub async fn delete(&self, id: &str, user_id: Option<&str>) -> Result<(), SubmissionError> {
        let user_id = match user_id {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Err(SubmissionError::MissingFields(vec!["userId"])),
        };

        let id = Uuid::parse_str(id).map_err(|_| SubmissionError::NotFound)?;
        let entry = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(SubmissionError::NotFound)?;

        if !entry.is_owned_by(user_id) {
            warn!("Rejected delete of entry {} by non-owner", id);
            return Err(SubmissionError::Forbidden);
        }

        if !self.store.delete(id).await? {
            return Err(SubmissionError::NotFound);
        }

        info!("Entry {} deleted", id);
        Ok(())
    }

    /// Pitch-deck bytes for the entry paid with `payment_intent_id`.
    /// Anything not owned by `user_id` is reported as missing.
    pub async fn fetch_file(
        &self,
        payment_intent_id: &str,
        user_id: &str,
    ) -> Result<EntryFile, SubmissionError> {
        let entry = self
            .store
            .find_by_payment_intent(payment_intent_id)
            .await?
            .filter(|e| e.is_owned_by(user_id))
            .ok_or(SubmissionError::NotFound)?;

        let EntryContent::PitchDeck { file } = entry.content else {
            return Err(SubmissionError::NotFound);
        };

        let data = BASE64
            .decode(file.file_data.as_bytes())
            .map_err(|e| SubmissionError::CorruptFile(e.to_string()))?;

        Ok(EntryFile {
            file_name: file.file_name,
            content_type: file.file_type,
            data,
        })
    }
}
