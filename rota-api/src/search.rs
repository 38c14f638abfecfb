use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use rota_core::{NormalizedFlight, RelayOutcome, SearchParams, WebhookPayload};
use rota_offer::SearchOutcome;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub search: SearchParams,
    #[serde(default)]
    pub flights: Vec<NormalizedFlight>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/flights/relay", post(relay_flights))
}

/// POST /v1/flights/search
/// Validate, search and rank; `source` tells live results from fallback ones
async fn search_flights(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchOutcome>, AppError> {
    let params = state.validator.ensure_valid(&params)?;
    Ok(Json(state.orchestrator.search(&params).await))
}

/// POST /v1/flights/relay
/// Forward a search and its flights to the workflow webhook
async fn relay_flights(
    State(state): State<AppState>,
    Json(req): Json<RelayRequest>,
) -> Result<(StatusCode, Json<RelayOutcome>), AppError> {
    let search = state.validator.ensure_valid(&req.search)?;

    let payload = WebhookPayload {
        source: state.webhook_source.clone(),
        search,
        flights: req.flights,
    };
    let outcome = state.relay.relay(&payload).await;

    let status = if outcome.ok { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    Ok((status, Json(outcome)))
}
