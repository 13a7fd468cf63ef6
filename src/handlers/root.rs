use axum::response::IntoResponse;

#[tracing::instrument]
pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Visit Counter API
Version: {version}

Available endpoints:
  - GET  /api/visits - Current visit count
  - POST /api/visits - Record a visit and return the new count
  - GET  /health     - Liveness check (never touches Redis)
  - GET  /ready      - Readiness check (pings Redis)
  - GET  /metrics    - Prometheus metrics
"#
    )
}
