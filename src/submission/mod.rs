// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Entry submission, retrieval and deletion

pub mod error;
pub mod retrieval;
pub mod service;

pub use error::SubmissionError;
pub use retrieval::{EntryFile, EntryRetrieval};
pub use service::{SubmissionOutcome, SubmissionService};
