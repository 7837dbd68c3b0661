//! Route handlers: health, candidates, generate.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};

use crate::catalog::CatalogClient;
use crate::error::{ForgeError, INTERNAL_ERROR_MESSAGE};

use super::{json_error, AppState};

/// Query parameters for `GET /api/candidates`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateParams {
    #[serde(rename = "colorIdentity")]
    pub color_identity: Option<String>,
    pub cmc: Option<String>,
}

/// Query parameters for `GET /api/generate`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateParams {
    pub cost: Option<String>,
}

/// Parse the optional `cmc` parameter. Anything non-numeric means "all".
pub(crate) fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
}

/// Map a forge error onto a JSON error response.
pub(crate) fn forge_error_response(err: &ForgeError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "request failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "request rejected");
    }
    json_error(status, &err.public_message())
}

fn join_error_response(err: &tokio::task::JoinError) -> Response {
    error!(error = %err, "blocking task failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /api/candidates?colorIdentity=..&cmc=..
pub(crate) async fn handle_candidates<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<CandidateParams>,
) -> Response {
    let count = parse_count(params.cmc.as_deref());

    // Catalog I/O is blocking.
    let result = tokio::task::spawn_blocking(move || {
        let mut rng = state.forge.request_rng();
        state
            .forge
            .select_candidates(params.color_identity.as_deref(), count, &mut rng)
    })
    .await;

    match result {
        Ok(Ok(cards)) => {
            (StatusCode::OK, Json(serde_json::json!({ "cards": cards }))).into_response()
        }
        Ok(Err(err)) => forge_error_response(&err),
        Err(err) => join_error_response(&err),
    }
}

/// GET /api/generate?cost=..
pub(crate) async fn handle_generate<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<GenerateParams>,
) -> Response {
    let cost = params.cost.unwrap_or_default();

    let result = tokio::task::spawn_blocking(move || {
        let mut rng = state.forge.request_rng();
        state.forge.generate(&cost, &mut rng)
    })
    .await;

    match result {
        Ok(Ok(card)) => (StatusCode::OK, Json(card)).into_response(),
        Ok(Err(err)) => forge_error_response(&err),
        Err(err) => join_error_response(&err),
    }
}
