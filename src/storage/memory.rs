// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory entry store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{check_schema, newest_first, EntryStore, StorageError};
use crate::entries::{Entry, PaymentStatus};

/// Entries keyed by id with a secondary payment-intent index.
/// Shared by the memory and file backends.
#[derive(Debug, Default)]
pub(crate) struct EntryIndex {
    entries: HashMap<Uuid, Entry>,
    by_payment_intent: HashMap<String, Uuid>,
}

impl EntryIndex {
    /// Checks an entry could be inserted without changing anything
    pub(crate) fn check_insert(&self, entry: &Entry) -> Result<(), StorageError> {
        check_schema(entry)?;

        if let Some(existing) = self
            .by_payment_intent
            .get(&entry.payment_intent_id)
            .and_then(|id| self.entries.get(id))
        {
            return Err(StorageError::Duplicate {
                payment_intent_id: entry.payment_intent_id.clone(),
                existing: Box::new(existing.clone()),
            });
        }

        if self.entries.contains_key(&entry.id) {
            return Err(StorageError::SchemaViolation(format!(
                "id {} already in use",
                entry.id
            )));
        }

        Ok(())
    }

    pub(crate) fn put(&mut self, entry: Entry) {
        self.by_payment_intent
            .insert(entry.payment_intent_id.clone(), entry.id);
        self.entries.insert(entry.id, entry);
    }

    pub(crate) fn remove(&mut self, id: Uuid) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        self.by_payment_intent.remove(&entry.payment_intent_id);
        Some(entry)
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub(crate) fn get_by_payment_intent(&self, payment_intent_id: &str) -> Option<&Entry> {
        self.by_payment_intent
            .get(payment_intent_id)
            .and_then(|id| self.entries.get(id))
    }

    pub(crate) fn owned_by(&self, user_id: &str) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .entries
            .values()
            .filter(|e| e.is_owned_by(user_id))
            .cloned()
            .collect();
        entries.sort_by(newest_first);
        entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The entry after a failed-payment transition, if it needs rewriting
pub(crate) fn failed_transition(entry: &Entry) -> Option<Entry> {
    match entry.payment_status {
        PaymentStatus::Succeeded => {
            let mut updated = entry.clone();
            updated.payment_status = PaymentStatus::Failed;
            Some(updated)
        }
        PaymentStatus::Pending | PaymentStatus::Failed => None,
    }
}

/// Store that lives for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    index: RwLock<EntryIndex>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn insert(&self, entry: Entry) -> Result<Entry, StorageError> {
        let mut index = self.index.write().await;
        index.check_insert(&entry)?;
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
        Ok(self.index.write().await.remove(id).is_some())
    }

    async fn mark_payment_failed(&self, payment_intent_id: &str) -> Result<bool, StorageError> {
        let mut index = self.index.write().await;
        let Some(entry) = index.get_by_payment_intent(payment_intent_id) else {
            return Ok(false);
        };
        if let Some(updated) = failed_transition(entry) {
            index.put(updated);
        }
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
