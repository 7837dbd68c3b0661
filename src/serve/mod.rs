//! HTTP JSON boundary for the forge.
//!
//! Endpoints:
//! - GET /health                                  - Server status
//! - GET /api/candidates?colorIdentity=..&cmc=..  - Sampled candidate records
//! - GET /api/generate?cost=..                    - A freshly generated card
//!
//! Errors are `{ "error": "..." }` with the status from `ForgeError`.
//! Catalog calls run on the blocking pool; each request gets its own RNG.

mod handlers;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::catalog::{CatalogClient, ScryfallClient};
use crate::core::ForgeConfig;
use crate::forge::Forge;

use self::handlers::{handle_candidates, handle_generate, handle_health, handle_not_found};

/// Shared server state.
#[derive(Debug)]
pub struct AppState<C> {
    pub forge: Forge<C>,
}

impl<C: CatalogClient> AppState<C> {
    /// Wrap a forge for sharing across handlers.
    #[must_use]
    pub fn new(forge: Forge<C>) -> Arc<Self> {
        Arc::new(Self { forge })
    }
}

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Build the router over any catalog client.
pub fn router<C: CatalogClient + 'static>(state: Arc<AppState<C>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/candidates", get(handle_candidates::<C>))
        .route("/api/generate", get(handle_generate::<C>))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(state)
}

/// Serve the Scryfall-backed forge on `config.bind_addr` until Ctrl+C.
pub async fn start_server(config: &ForgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = ScryfallClient::new(config);
    let state = AppState::new(Forge::new(client, config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, catalog = %config.catalog_url, "commander-forge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal"),
        Err(err) => error!(error = %err, "failed to listen for Ctrl+C"),
    }
}
