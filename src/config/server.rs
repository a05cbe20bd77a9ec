// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the entry node

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::entries::validation::DEFAULT_MAX_FILE_BYTES;

/// Origins the browser client is served from during development
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Which payment provider backs the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProviderKind {
    Stripe,
    /// In-memory provider; intents never succeed on their own
    Mock,
}

impl FromStr for PaymentProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stripe" => Ok(PaymentProviderKind::Stripe),
            "mock" => Ok(PaymentProviderKind::Mock),
            other => Err(format!("Unknown payment provider '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentProviderKind::Stripe => f.write_str("stripe"),
            PaymentProviderKind::Mock => f.write_str("mock"),
        }
    }
}

/// Payment provider configuration
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub provider: PaymentProviderKind,
    /// Stripe secret API key
    pub stripe_secret_key: Option<String>,
    /// Shared secret used to sign webhooks
    pub stripe_webhook_secret: Option<String>,
    /// API origin override (stripe-mock, proxies)
    pub stripe_api_base: Option<String>,
    /// ISO currency code for intents
    pub currency: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Node configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root directory of the file entry store
    pub data_dir: PathBuf,
    /// Deployed frontend origin, allowed by CORS
    pub frontend_url: Option<String>,
    /// Upload cap applied to both validation and the request body limit
    pub max_upload_bytes: u64,
    pub payment: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: non_empty("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            frontend_url: non_empty("FRONTEND_URL"),
            max_upload_bytes: non_empty("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            payment: PaymentConfig {
                provider: non_empty("PAYMENT_PROVIDER")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.payment.provider),
                stripe_secret_key: non_empty("STRIPE_SECRET_KEY"),
                stripe_webhook_secret: non_empty("STRIPE_WEBHOOK_SECRET"),
                stripe_api_base: non_empty("STRIPE_API_BASE"),
                currency: non_empty("PAYMENT_CURRENCY")
                    .map(|v| v.to_lowercase())
                    .unwrap_or(defaults.payment.currency),
                timeout_secs: non_empty("PROVIDER_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.payment.timeout_secs),
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_upload_bytes == 0 {
            return Err("Upload limit must be greater than 0".to_string());
        }
        if self.payment.timeout_secs == 0 {
            return Err("Provider timeout must be greater than 0".to_string());
        }
        if self.payment.currency.len() != 3
            || !self.payment.currency.chars().all(|c| c.is_ascii_lowercase())
        {
            return Err(format!(
                "Currency must be a three-letter ISO code, got '{}'",
                self.payment.currency
            ));
        }
        if let Some(frontend) = &self.frontend_url {
            url::Url::parse(frontend)
                .map_err(|e| format!("FRONTEND_URL is not a valid URL: {}", e))?;
        }
        Ok(())
    }

    /// Origins allowed to call the API from a browser
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|o| o.to_string()).collect();
        if let Some(frontend) = &self.frontend_url {
            let frontend = frontend.trim_end_matches('/').to_string();
            if !origins.contains(&frontend) {
                origins.push(frontend);
            }
        }
        origins
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: PathBuf::from("./data"),
            frontend_url: None,
            max_upload_bytes: DEFAULT_MAX_FILE_BYTES,
            payment: PaymentConfig {
                provider: PaymentProviderKind::Stripe,
                stripe_secret_key: None,
                stripe_webhook_secret: None,
                stripe_api_base: None,
                currency: "usd".to_string(),
                timeout_secs: 30,
            },
        }
    }
}
