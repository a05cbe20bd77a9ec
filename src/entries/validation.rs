// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structural validation of candidate entries
//!
//! Every rule is evaluated and all violations are returned together so the
//! client can fix the whole form in one round trip.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::candidate::{is_blank, EntryCandidate, UploadedFile};
use super::types::{Category, EntryType, FieldError};

/// Minimum title length in characters
pub const TITLE_MIN_CHARS: usize = 5;

/// Maximum title length in characters
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in characters
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Word count bounds for text entries
pub const TEXT_MIN_WORDS: usize = 100;
pub const TEXT_MAX_WORDS: usize = 2000;

/// Authoritative upload cap (4 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

/// Accepted pitch deck MIME types (pdf, ppt, pptx)
pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

const VIDEO_URL_PATTERN: &str = r"(?i)^(https?://)?(www\.)?(youtube\.com|youtu\.be|vimeo\.com)";

/// A single rule violation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid category '{value}'")]
    InvalidCategory { value: String },

    #[error("Invalid entry type '{value}'")]
    InvalidEntryType { value: String },

    #[error("Title must be between {min}-{max} characters, got {length}")]
    TitleLength { length: usize, min: usize, max: usize },

    #[error("Description must be at most {max} characters, got {length}")]
    DescriptionLength { length: usize, max: usize },

    #[error("Text entries must be between {min}-{max} words. Current: {words} words")]
    TextLength { words: usize, min: usize, max: usize },

    #[error("File required for pitch-deck entries")]
    MissingFile,

    #[error("Invalid file type '{file_type}'. Only PDF and PPT files are allowed.")]
    FileType { file_type: String },

    #[error("File size {size} bytes exceeds the {max} byte limit")]
    FileSize { size: u64, max: u64 },

    #[error("Valid YouTube or Vimeo URL required for video entries")]
    InvalidVideoUrl { url: String },
}

impl Violation {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::MissingField { .. } => "missing_field",
            Violation::InvalidCategory { .. } => "invalid_category",
            Violation::InvalidEntryType { .. } => "invalid_entry_type",
            Violation::TitleLength { .. } => "title_length_violation",
            Violation::DescriptionLength { .. } => "description_length_violation",
            Violation::TextLength { .. } => "text_length_violation",
            Violation::MissingFile => "missing_file",
            Violation::FileType { .. } => "file_type_violation",
            Violation::FileSize { .. } => "file_size_violation",
            Violation::InvalidVideoUrl { .. } => "invalid_video_url",
        }
    }

    /// Form field the violation refers to
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingField { field } => *field,
            Violation::InvalidCategory { .. } => "category",
            Violation::InvalidEntryType { .. } => "entryType",
            Violation::TitleLength { .. } => "title",
            Violation::DescriptionLength { .. } => "description",
            Violation::TextLength { .. } => "textContent",
            Violation::MissingFile | Violation::FileType { .. } | Violation::FileSize { .. } => {
                "file"
            }
            Violation::InvalidVideoUrl { .. } => "videoUrl",
        }
    }
}

impl From<FieldError> for Violation {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::InvalidCategory(value) => Violation::InvalidCategory { value },
            FieldError::InvalidEntryType(value) => Violation::InvalidEntryType { value },
        }
    }
}

/// Tunable limits; only the upload cap is configurable
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub max_file_bytes: u64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntryValidator {
    rules: ValidationRules,
}

impl EntryValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Evaluate every rule and return all violations found
    pub fn validate(
        &self,
        candidate: &EntryCandidate,
        file: Option<&UploadedFile>,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        if is_blank(&candidate.category) {
            violations.push(Violation::MissingField { field: "category" });
        } else if let Some(category) = candidate.category.as_deref() {
            if category.parse::<Category>().is_err() {
                violations.push(Violation::InvalidCategory {
                    value: category.to_string(),
                });
            }
        }

        match candidate.title.as_deref() {
            Some(title) if !title.trim().is_empty() => {
                let length = title.chars().count();
                if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length) {
                    violations.push(Violation::TitleLength {
                        length,
                        min: TITLE_MIN_CHARS,
                        max: TITLE_MAX_CHARS,
                    });
                }
            }
            _ => violations.push(Violation::MissingField { field: "title" }),
        }

        if let Some(description) = candidate.description.as_deref() {
            let length = description.chars().count();
            if length > DESCRIPTION_MAX_CHARS {
                violations.push(Violation::DescriptionLength {
                    length,
                    max: DESCRIPTION_MAX_CHARS,
                });
            }
        }

        let entry_type = match candidate.entry_type.as_deref() {
            Some(value) if !value.trim().is_empty() => match value.parse::<EntryType>() {
                Ok(entry_type) => Some(entry_type),
                Err(_) => {
                    violations.push(Violation::InvalidEntryType {
                        value: value.to_string(),
                    });
                    None
                }
            },
            _ => {
                violations.push(Violation::MissingField { field: "entryType" });
                None
            }
        };

        match entry_type {
            Some(EntryType::Text) => {
                // Absent content counts as zero words
                let words = count_words(candidate.text_content.as_deref().unwrap_or_default());
                if !(TEXT_MIN_WORDS..=TEXT_MAX_WORDS).contains(&words) {
                    violations.push(Violation::TextLength {
                        words,
                        min: TEXT_MIN_WORDS,
                        max: TEXT_MAX_WORDS,
                    });
                }
            }
            Some(EntryType::PitchDeck) => match file {
                None => violations.push(Violation::MissingFile),
                Some(file) => {
                    if file.size() > self.rules.max_file_bytes {
                        violations.push(Violation::FileSize {
                            size: file.size(),
                            max: self.rules.max_file_bytes,
                        });
                    }
                    if !is_allowed_file_type(&file.content_type) {
                        violations.push(Violation::FileType {
                            file_type: file.content_type.clone(),
                        });
                    }
                }
            },
            Some(EntryType::Video) => {
                let url = candidate.video_url.as_deref().unwrap_or_default();
                if url.trim().is_empty() {
                    violations.push(Violation::MissingField { field: "videoUrl" });
                } else if !is_valid_video_url(url) {
                    violations.push(Violation::InvalidVideoUrl {
                        url: url.to_string(),
                    });
                }
            }
            None => {}
        }

        violations
    }
}

/// Whitespace-delimited word count, empty tokens excluded
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn is_allowed_file_type(content_type: &str) -> bool {
    ALLOWED_FILE_TYPES.contains(&content_type)
}

/// YouTube or Vimeo host, optional scheme and `www.`, case-insensitive
pub fn is_valid_video_url(url: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(VIDEO_URL_PATTERN).expect("video url pattern compiles"))
        .is_match(url)
}
