use crate::app_state::AppState;
use crate::domain::VISITS_KEY;
use crate::handlers::shared_types::ApiError;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VisitsResponse {
    visits: i64,
    pod: String,
}

/// Handler for reading the visit counter (GET /api/visits).
///
/// - Responds `200 OK` with `{ "visits": n, "pod": ... }`; an absent key reads as 0.
/// - Responds `500` with `{ "error": ... }` if the store round trip fails.
#[tracing::instrument(skip(state))]
pub async fn get_visits(State(state): State<AppState>) -> Result<Json<VisitsResponse>, ApiError> {
    // ---
    let visits = state.store().get(VISITS_KEY).await?.unwrap_or(0);

    Ok(Json(VisitsResponse {
        visits,
        pod: state.pod().to_owned(),
    }))
}

/// Handler for incrementing the visit counter (POST /api/visits).
///
/// The increment is a single atomic store command, so concurrent callers
/// each observe a distinct value.
///
/// - Responds `200 OK` with the new value and bumps `page_visits_total`.
/// - Responds `500` with `{ "error": ... }` if the store round trip fails.
#[tracing::instrument(skip(state))]
pub async fn increment_visits(
    State(state): State<AppState>,
) -> Result<Json<VisitsResponse>, ApiError> {
    // ---
    let visits = state.store().increment(VISITS_KEY).await?;
    state.metrics().record_visit();

    tracing::info!(visits, "Visit recorded");

    Ok(Json(VisitsResponse {
        visits,
        pod: state.pod().to_owned(),
    }))
}
