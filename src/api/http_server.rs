// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::entries::{delete_entry_handler, list_entries_handler, submit_entry_handler};
use super::errors::ApiError;
use super::files::download_file_handler;
use super::handlers::{fees_handler, health_handler, index_handler, submission_rules_handler};
use super::payment_intent::create_payment_intent_handler;
use super::webhook::webhook_handler;
use crate::config::ServerConfig;
use crate::entries::{EntryValidator, ValidationRules};
use crate::payments::PaymentProvider;
use crate::storage::EntryStore;

/// Room for the non-file form fields of a multipart submission
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared handler state. Store and provider start empty and are filled in
/// once initialised; handlers answer 503 until then.
#[derive(Clone)]
pub struct AppState {
    pub entry_store: Arc<RwLock<Option<Arc<dyn EntryStore>>>>,
    pub payment_provider: Arc<RwLock<Option<Arc<dyn PaymentProvider>>>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            entry_store: Arc::new(RwLock::new(None)),
            payment_provider: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
        }
    }

    /// Default config with a fixed webhook secret and both slots empty
    pub fn new_for_test() -> Self {
        let mut config = ServerConfig::default();
        config.payment.stripe_webhook_secret = Some("whsec_test_secret".to_string());
        Self::new(config)
    }

    pub async fn set_entry_store(&self, store: Arc<dyn EntryStore>) {
        *self.entry_store.write().await = Some(store);
    }

    pub async fn set_payment_provider(&self, provider: Arc<dyn PaymentProvider>) {
        *self.payment_provider.write().await = Some(provider);
    }

    pub async fn entry_store(&self) -> Result<Arc<dyn EntryStore>, ApiError> {
        self.entry_store
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or_else(|| ApiError::ServiceUnavailable("Entry store not available".to_string()))
    }

    pub async fn payment_provider(&self) -> Result<Arc<dyn PaymentProvider>, ApiError> {
        self.payment_provider
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or_else(|| {
                ApiError::ServiceUnavailable("Payment provider not available".to_string())
            })
    }

    pub fn validator(&self) -> EntryValidator {
        EntryValidator::new(ValidationRules {
            max_file_bytes: self.config.max_upload_bytes,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/fees/:category", get(fees_handler))
        .route("/api/submission-rules", get(submission_rules_handler))
        .route(
            "/api/create-payment-intent",
            post(create_payment_intent_handler),
        )
        .route("/api/entries", post(submit_entry_handler))
        .route(
            "/api/entries/:id",
            get(list_entries_handler).delete(delete_entry_handler),
        )
        .route("/api/file/:payment_intent_id", get(download_file_handler))
        .route("/api/webhook", post(webhook_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.listen_addr();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn not_found_handler(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    let body = ApiError::InternalError("Internal server error".to_string()).to_response();
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
