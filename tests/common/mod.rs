// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use visit_counter::domain::{CounterStore, CounterStorePtr, StoreError};
use visit_counter::{build_router, create_prom_metrics};

// ============================================================================
// Test doubles
// ============================================================================

/// In-memory counter store with Redis `GET`/`INCR` semantics.
#[derive(Default)]
pub struct MemoryStore {
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    // ---
    pub fn with_value(key: &str, value: i64) -> Self {
        // ---
        let store = Self::default();
        store.counters.lock().unwrap().insert(key.to_string(), value);
        store
    }
}

#[async_trait::async_trait]
impl CounterStore for MemoryStore {
    // ---
    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.counters.lock().unwrap().get(key).copied())
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// Test Server
// ============================================================================

pub const TEST_POD: &str = "test-pod";

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    /// Serve a router backed by a fresh in-memory store.
    pub async fn new() -> Self {
        // ---
        Self::with_store(Arc::new(MemoryStore::default())).await
    }

    /// Serve a router backed by `store` and a fresh metrics registry.
    pub async fn with_store(store: CounterStorePtr) -> Self {
        // ---
        let metrics = create_prom_metrics().expect("Should be able to create metrics");
        let app = build_router(store, metrics, TEST_POD);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(50)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    /// Fetch `/metrics` and return the body.
    pub async fn scrape(&self) -> String {
        // ---
        let res = self.client.get(self.url("/metrics")).send().await.unwrap();
        assert!(res.status().is_success(), "metrics scrape failed");
        res.text().await.unwrap()
    }
}

// ============================================================================
// Exposition parsing
// ============================================================================

/// Value of the sample `name{labels}` in a text exposition body.
///
/// Returns 0 when the series has not been emitted yet.
pub fn sample_value(body: &str, name: &str, labels: &[(&str, &str)]) -> f64 {
    // ---
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .filter(|line| {
            let series = line.split_whitespace().next().unwrap_or_default();
            series == name || series.starts_with(&format!("{name}{{"))
        })
        .find(|line| {
            labels
                .iter()
                .all(|(key, value)| line.contains(&format!("{key}=\"{value}\"")))
        })
        .and_then(|line| line.split_whitespace().last())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0.0)
}

/// Shorthand for `http_requests_total{method, route, status}`.
pub fn requests_total(body: &str, method: &str, route: &str, status: u16) -> f64 {
    // ---
    let status = status.to_string();
    sample_value(
        body,
        "http_requests_total",
        &[("method", method), ("route", route), ("status", &status)],
    )
}
