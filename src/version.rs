// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the competition entry node

/// Full version string with feature description
pub const VERSION: &str = "v1.2.0-entry-dedup-2026-10-12";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-12";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "text-entries",
    "pitch-deck-uploads",
    "video-links",
    "fee-preview",
    "stripe-payment-intents",
    "signed-webhooks",
    "payment-intent-dedup",
    "file-entry-store",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Competition Entry Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
