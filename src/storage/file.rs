// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! File-backed entry store
//!
//! One JSON document per entry under `<data_dir>/entries/<id>.json`.
//! Documents are loaded into memory when the store opens; every mutation
//! writes the document first and only then updates the in-memory index.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::memory::{failed_transition, EntryIndex};
use super::store::{EntryStore, StorageError};
use crate::entries::Entry;

pub struct FileEntryStore {
    entries_dir: PathBuf,
    index: RwLock<EntryIndex>,
}

impl FileEntryStore {
    /// Open (or create) a store rooted at `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let entries_dir = data_dir.as_ref().join("entries");
        fs::create_dir_all(&entries_dir).await?;

        let mut index = EntryIndex::default();
        let mut dir = fs::read_dir(&entries_dir).await?;

        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let contents = fs::read(&path).await?;
            let entry: Entry = match serde_json::from_slice(&contents) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry document {:?}: {}", path, e);
                    continue;
                }
            };

            if let Err(e) = index.check_insert(&entry) {
                warn!("Skipping entry document {:?}: {}", path, e);
                continue;
            }
            index.put(entry);
        }

        info!(
            "Opened file entry store at {:?} ({} entries)",
            entries_dir,
            index.len()
        );

        Ok(Self {
            entries_dir,
            index: RwLock::new(index),
        })
    }

    fn entry_path(&self, id: Uuid) -> PathBuf {
        self.entries_dir.join(format!("{}.json", id))
    }

    async fn write_document(&self, entry: &Entry) -> Result<(), StorageError> {
        let path = self.entry_path(entry.id);
        let json = serde_json::to_vec_pretty(entry)?;

        // Write atomically using a temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;

        fs::rename(temp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for FileEntryStore {
    async fn insert(&self, entry: Entry) -> Result<Entry, StorageError> {
        let mut index = self.index.write().await;
        index.check_insert(&entry)?;

        self.write_document(&entry).await?;
        debug!("Wrote entry document {}", entry.id);

        index.put(entry.clone());
        Ok(entry)
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Entry>, StorageError> {
        Ok(self.index.read().await.owned_by(user_id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, StorageError> {
        Ok(self.index.read().await.get(id).cloned())
    }

    async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Entry>, StorageError> {
        Ok(self
            .index
            .read()
            .await
            .get_by_payment_intent(payment_intent_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut index = self.index.write().await;
        if index.get(id).is_none() {
            return Ok(false);
        }

        match fs::remove_file(self.entry_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        index.remove(id);
        Ok(true)
    }

    async fn mark_payment_failed(&self, payment_intent_id: &str) -> Result<bool, StorageError> {
        let mut index = self.index.write().await;
        let Some(entry) = index.get_by_payment_intent(payment_intent_id) else {
            return Ok(false);
        };

        if let Some(updated) = failed_transition(entry) {
            self.write_document(&updated).await?;
            index.put(updated);
        }
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
