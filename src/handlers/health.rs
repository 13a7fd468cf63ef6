use crate::app_state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    pod: String,
}

/// Liveness check.
///
/// Always answers `200 OK` with `{ "status": "healthy", "pod": ... }` and
/// never touches the counter store, so it stays green while Redis is down.
/// Use `/ready` to check store reachability.
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // ---
    Json(HealthResponse {
        status: "healthy",
        pod: state.pod().to_owned(),
    })
}
