// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stripe payment provider
//!
//! Talks to the Stripe REST API directly: form-encoded requests, bearer
//! secret key, JSON responses.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::provider::PaymentProvider;
use super::types::{CreateIntentParams, PaymentError, PaymentIntent};

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe payment provider
pub struct StripeProvider {
    secret_key: String,
    api_base: String,
    timeout_secs: u64,
    client: Client,
}

impl StripeProvider {
    /// Create a new Stripe provider
    ///
    /// # Arguments
    /// * `secret_key` - Stripe secret API key
    /// * `api_base` - API origin, overridable for stripe-mock
    /// * `timeout_secs` - Per-request timeout
    pub fn new(
        secret_key: String,
        api_base: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, PaymentError> {
        if secret_key.trim().is_empty() {
            return Err(PaymentError::NotConfigured {
                provider: "stripe".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        Ok(Self {
            secret_key,
            api_base: api_base
                .unwrap_or_else(|| STRIPE_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs,
            client,
        })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> PaymentError {
        if e.is_timeout() {
            PaymentError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            PaymentError::Transport(e.to_string())
        }
    }

    async fn parse_intent(
        &self,
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(PaymentError::NotFound { id: id.to_string() });
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: stripe_error_message(&body),
            });
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| PaymentError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(
        &self,
        params: CreateIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        let form = encode_create_form(&params);

        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.parse_intent(response, None).await
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        // Ids go into the path; refuse anything that could escape it
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PaymentError::NotFound { id: id.to_string() });
        }

        let response = self
            .client
            .get(format!("{}/{}", self.intents_url(), id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.parse_intent(response, Some(id)).await
    }

    fn name(&self) -> &'static str {
        "stripe"
    }

    fn is_available(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

/// Flatten intent parameters into Stripe's bracketed form encoding
fn encode_create_form(params: &CreateIntentParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount_minor.to_string()),
        ("currency".to_string(), params.currency.clone()),
        (
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ),
    ];

    let mut metadata: Vec<_> = params.metadata.iter().collect();
    metadata.sort();
    for (key, value) in metadata {
        form.push((format!("metadata[{}]", key), value.clone()));
    }

    form
}

/// Pull `error.message` out of a Stripe error body, falling back to the raw text
fn stripe_error_message(body: &str) -> String {
    serde_json::from_str::<StripeErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, serde::Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}
