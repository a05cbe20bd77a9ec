// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Competition entries: record types and structural validation

pub mod candidate;
pub mod types;
pub mod validation;
pub mod view;

pub use candidate::{EntryCandidate, UploadedFile};
pub use types::{
    Category, Entry, EntryContent, EntryType, FieldError, PaymentStatus, ReviewStatus, StoredFile,
};
pub use validation::{EntryValidator, ValidationRules, Violation};
pub use view::EntryView;
