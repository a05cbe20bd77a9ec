// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Signed webhook verification
//!
//! The provider signs `"{timestamp}.{raw body}"` with HMAC-SHA256 using a
//! shared secret and sends `t=<unix>,v1=<hex>` in the `Stripe-Signature`
//! header. Only events that pass verification are parsed.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age of a signed delivery
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const PAYMENT_FAILED_EVENT: &str = "payment_intent.payment_failed";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("No signature header on webhook request")]
    MissingSignature,

    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("Webhook timestamp {timestamp} is outside the tolerance window")]
    TimestampOutsideTolerance { timestamp: i64 },

    #[error("No signatures found matching the expected signature for payload")]
    SignatureMismatch,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Webhook signing secret rejected: {0}")]
    InvalidSecret(String),
}

/// A verified provider event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookEventData {
    pub object: WebhookObject,
}

/// The object the event refers to; for payment intent events this is the intent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookObject {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Verify the signature header against the raw payload and parse the event
    pub fn verify(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let header = header.ok_or(WebhookError::MissingSignature)?;
        let (timestamp, signatures) = parse_signature_header(header)?;

        // Header timestamps are untrusted; a difference that overflows is stale
        let age = now.checked_sub(timestamp).map(i64::unsigned_abs);
        if !matches!(age, Some(age) if age <= self.tolerance_secs.unsigned_abs()) {
            return Err(WebhookError::TimestampOutsideTolerance { timestamp });
        }

        let mac = self.mac_for(timestamp, payload)?;
        let matched = signatures
            .iter()
            .any(|signature| mac.clone().verify_slice(signature).is_ok());
        if !matched {
            return Err(WebhookError::SignatureMismatch);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    /// Produce a signature header for a payload; the inverse of `verify`
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> Result<String, WebhookError> {
        let signature = self.mac_for(timestamp, payload)?.finalize().into_bytes();
        Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
    }

    fn mac_for(&self, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| WebhookError::InvalidSecret(e.to_string()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }
}

fn parse_signature_header(header: &str) -> Result<(i64, Vec<Vec<u8>>), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(value.parse::<i64>().map_err(|_| {
                    WebhookError::MalformedHeader(format!("invalid timestamp '{}'", value))
                })?);
            }
            "v1" => {
                // Unparseable signatures are skipped; they can never match
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader("no v1 signatures".to_string()));
    }

    Ok((timestamp, signatures))
}
