// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use competition_entry_node::{
    api::{start_server, AppState},
    config::{PaymentProviderKind, ServerConfig},
    payments::{MockPaymentProvider, PaymentProvider, StripeProvider},
    storage::{EntryStore, FileEntryStore},
    version,
};
use std::{env, path::PathBuf, sync::Arc};
use tracing::{info, warn};

/// Competition entry submission node
#[derive(Debug, Parser)]
#[command(name = "competition-entry-node", version)]
struct Args {
    /// Interface to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Directory holding entry documents
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    config.validate().map_err(|e| anyhow!(e))?;

    info!("Starting {}", version::get_version_string());

    let state = AppState::new(config.clone());

    match FileEntryStore::open(&config.data_dir).await {
        Ok(store) => {
            let store: Arc<dyn EntryStore> = Arc::new(store);
            state.set_entry_store(store).await;
        }
        Err(e) => warn!(
            "Entry store unavailable ({:?}): {}. Entry endpoints will return 503",
            config.data_dir, e
        ),
    }

    match init_payment_provider(&config) {
        Ok(provider) => {
            info!("Payment provider ready: {}", provider.name());
            state.set_payment_provider(provider).await;
        }
        Err(e) => warn!("Payment provider unavailable: {}. Payment endpoints will return 503", e),
    }

    if config.payment.stripe_webhook_secret.is_none() {
        warn!("STRIPE_WEBHOOK_SECRET not set, webhooks will be refused");
    }

    info!("Allowed origins: {}", config.allowed_origins().join(", "));

    start_server(state).await?;

    info!("Goodbye");
    Ok(())
}

fn init_payment_provider(config: &ServerConfig) -> Result<Arc<dyn PaymentProvider>> {
    match config.payment.provider {
        PaymentProviderKind::Stripe => {
            let secret_key = config
                .payment
                .stripe_secret_key
                .clone()
                .ok_or_else(|| anyhow!("STRIPE_SECRET_KEY not set"))?;
            let provider = StripeProvider::new(
                secret_key,
                config.payment.stripe_api_base.clone(),
                config.payment.timeout_secs,
            )?;
            Ok(Arc::new(provider))
        }
        PaymentProviderKind::Mock => {
            warn!("Using in-memory mock payment provider; no real charges are made");
            Ok(Arc::new(MockPaymentProvider::new()))
        }
    }
}
