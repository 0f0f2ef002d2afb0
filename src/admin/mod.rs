//! HTTP service for editing the translations clients fetch.
//!
//! `GET /translations` serves the same `{ "en": {...}, "vn": {...} }` shape
//! that [`crate::fetcher::HttpTranslationFetcher`] consumes.

mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::controller::Clock;
use crate::store::TranslationStore;

pub use handlers::{
    KeyUpdate,
    KeyValue,
};

/// Shared state for admin handlers.
#[derive(Clone)]
pub struct AdminState {
    /// Source-of-truth tables
    store: Arc<TranslationStore>,
    /// Stamps each edit
    clock: Arc<dyn Clock>,
}

impl AdminState {
    #[must_use]
    pub fn new(store: Arc<TranslationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl std::fmt::Debug for AdminState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminState").field("store", &self.store).finish_non_exhaustive()
    }
}

/// Create the admin routes.
pub fn router(state: AdminState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/translations", get(handlers::get_all))
        .route("/translations/{lang}", get(handlers::get_language).put(handlers::put_language))
        .route("/translations/{lang}/{key}", get(handlers::get_key).put(handlers::put_key))
        .with_state(state)
}

/// Serves the admin routes until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AdminState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Translation admin service listening");
    }

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down translation admin service");
}
