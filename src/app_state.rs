//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the counter
//! store, the metrics registry and the identity reported in responses.
//!
//! The state is cheaply cloneable (`Arc` internally) so it can be passed to
//! each request handler without copying the underlying resources.

use crate::domain::{CounterStorePtr, MetricsPtr};
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// Built once at startup, attached to the router with `.with_state(...)`,
/// and cloned by Axum for every request. It is never mutated after
/// construction; the store and the registry manage their own interior state.
///
/// # Fields
///
/// - `store`: counter store (Redis in production, in-memory in tests)
/// - `metrics`: Prometheus registry wrapper
/// - `pod`: instance identity echoed as `pod` in JSON responses
#[derive(Clone)]
pub(crate) struct AppState {
    /// Counter store shared by every handler.
    ///
    /// Concurrent increments rely on the store's atomic increment, never on
    /// locking in this process.
    store: CounterStorePtr,

    /// Metrics implementation for recording application events.
    metrics: MetricsPtr,

    /// Value of `HOSTNAME` at startup, or empty.
    pod: Arc<str>,
}

impl AppState {
    // ---

    pub fn new(store: CounterStorePtr, metrics: MetricsPtr, pod: impl Into<Arc<str>>) -> Self {
        // ---
        AppState {
            store,
            metrics,
            pod: pod.into(),
        }
    }

    /// Get a reference to the counter store.
    pub(crate) fn store(&self) -> &CounterStorePtr {
        // ---
        &self.store
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Identity reported in response bodies.
    pub(crate) fn pod(&self) -> &str {
        // ---
        &self.pod
    }
}
