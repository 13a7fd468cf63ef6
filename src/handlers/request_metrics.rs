use crate::app_state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Records one `http_requests_total` sample per response.
///
/// Installed with `route_layer`, so it only sees requests that matched a
/// route and labels them with the route template rather than the raw path.
/// The sample is taken after the inner handler returns, which keeps a
/// `/metrics` scrape out of its own output.
pub async fn track_requests(
    State(state): State<AppState>,
    matched_path: MatchedPath,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let method = request.method().clone();
    let route = matched_path.as_str().to_owned();

    let response = next.run(request).await;

    state.metrics().record_http_request(
        start,
        &route,
        method.as_str(),
        response.status().as_u16(),
    );

    response
}
