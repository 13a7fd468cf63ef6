use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    pod: String,
}

/// Readiness check.
///
/// Pings the counter store.
///
/// # Responses
/// - `200 OK` with `{ "status": "ready" }` when the store answers.
/// - `503 SERVICE UNAVAILABLE` with `{ "status": "unavailable", "error": ... }` otherwise.
#[tracing::instrument(skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    // ---
    let pod = state.pod().to_owned();

    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready",
                error: None,
                pod,
            }),
        ),
        Err(err) => {
            tracing::warn!("Readiness check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "unavailable",
                    error: Some(err.to_string()),
                    pod,
                }),
            )
        }
    }
}
