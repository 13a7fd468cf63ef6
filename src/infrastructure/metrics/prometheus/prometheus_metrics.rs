//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait on
//! top of a `prometheus::Registry` owned by the struct itself. The registry is
//! built once at startup and shared through `AppState`, so every test can
//! construct its own instance without fighting over a process-global recorder.
//!
//! Registered series:
//!
//! - `http_requests_total{method, route, status}`
//! - `http_request_duration_seconds{method, route}`
//! - `page_visits_total`
//! - default process metrics (`process_*`), Linux only

use crate::domain::Metrics;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Instant;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    // ---
    registry: Registry,
    http_requests: IntCounterVec,
    http_request_duration: HistogramVec,
    page_visits: IntCounter,
}

impl PrometheusMetrics {
    // ---
    pub fn new() -> anyhow::Result<Self> {
        // ---
        tracing::info!("Creating Prometheus metrics");
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "status"],
        )?;
        registry.register(Box::new(http_requests.clone()))?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "route"],
        )?;
        registry.register(Box::new(http_request_duration.clone()))?;

        let page_visits = IntCounter::with_opts(Opts::new("page_visits_total", "Total page visits"))?;
        registry.register(Box::new(page_visits.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(PrometheusMetrics {
            registry,
            http_requests,
            http_request_duration,
            page_visits,
        })
    }
}

impl Metrics for PrometheusMetrics {
    // ---
    fn render(&self) -> anyhow::Result<String> {
        // ---
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn record_visit(&self) {
        tracing::debug!("Recording page visit");
        self.page_visits.inc();
    }

    fn record_http_request(&self, start: Instant, route: &str, method: &str, status: u16) {
        // ---
        tracing::debug!(route, method, status, "Recording HTTP request");
        let status = status.to_string();

        self.http_requests
            .with_label_values(&[method, route, status.as_str()])
            .inc();
        self.http_request_duration
            .with_label_values(&[method, route])
            .observe(start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn fresh_registry_renders_visit_counter_at_zero() -> anyhow::Result<()> {
        // ---
        let metrics = PrometheusMetrics::new()?;
        let body = metrics.render()?;

        assert!(body.contains("# TYPE page_visits_total counter"));
        assert!(body.contains("page_visits_total 0"));
        Ok(())
    }

    #[test]
    fn http_requests_are_labeled_by_method_route_and_status() -> anyhow::Result<()> {
        // ---
        let metrics = PrometheusMetrics::new()?;
        metrics.record_http_request(Instant::now(), "/api/visits", "GET", 500);
        metrics.record_http_request(Instant::now(), "/api/visits", "GET", 500);
        metrics.record_http_request(Instant::now(), "/health", "GET", 200);

        let failed = metrics
            .http_requests
            .with_label_values(&["GET", "/api/visits", "500"])
            .get();
        let healthy = metrics
            .http_requests
            .with_label_values(&["GET", "/health", "200"])
            .get();
        assert_eq!(failed, 2);
        assert_eq!(healthy, 1);

        let body = metrics.render()?;
        assert!(body.contains(r#"http_requests_total{method="GET",route="/api/visits",status="500"} 2"#));
        assert!(body.contains("http_request_duration_seconds_count"));
        Ok(())
    }

    #[test]
    fn visits_increment_independently_per_registry() -> anyhow::Result<()> {
        // ---
        let first = PrometheusMetrics::new()?;
        let second = PrometheusMetrics::new()?;
        first.record_visit();
        first.record_visit();

        assert_eq!(first.page_visits.get(), 2);
        assert_eq!(second.page_visits.get(), 0);
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn process_metrics_are_exported() -> anyhow::Result<()> {
        // ---
        let body = PrometheusMetrics::new()?.render()?;
        assert!(body.contains("process_start_time_seconds"));
        Ok(())
    }
}
