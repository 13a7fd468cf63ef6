mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

/// Creates a new Prometheus metrics implementation.
///
/// Each call builds an independent registry holding the HTTP and visit
/// counters plus the default process collector.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");

    Ok(Arc::new(PrometheusMetrics::new()?))
}
