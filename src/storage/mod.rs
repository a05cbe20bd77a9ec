// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod file;
pub mod memory;
pub mod store;

// Re-export main types for convenience
pub use file::FileEntryStore;
pub use memory::InMemoryEntryStore;
pub use store::{EntryStore, StorageError};

#[cfg(test)]
pub use store::MockEntryStore;
