// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{middleware, routing::get, Router};

use domain::{CounterStorePtr, MetricsPtr};
use handlers::{
    get_visits, health_check, increment_visits, metrics_handler, readiness_check, root_handler,
    track_requests,
};
use tracing_subscriber::EnvFilter;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_prom_metrics, // ---
    create_redis_store,
};

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok(); // Ignores if already initialized
}

/// Build the production router: Redis counter store plus Prometheus metrics.
///
/// Returns without waiting for Redis: an unreachable or unresponsive server
/// does not fail or delay this call; see [`create_redis_store`]. Must be
/// called from within a Tokio runtime.
pub fn create_router(config: &AppConfig) -> Result<Router> {
    // ---
    let metrics = create_prom_metrics()?;
    let store = create_redis_store(&config.redis)?;

    Ok(build_router(store, metrics, config.server.pod.clone()))
}

/// Build the HTTP router around explicit dependencies.
///
/// `pod` is echoed in every JSON body. Request metrics are recorded for
/// matched routes only.
pub fn build_router(store: CounterStorePtr, metrics: MetricsPtr, pod: impl Into<String>) -> Router {
    // ---
    let pod: String = pod.into();
    let app_state = AppState::new(store, metrics, pod);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/visits", get(get_visits).post(increment_visits))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_requests,
        ))
        .with_state(app_state)
}
