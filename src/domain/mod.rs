mod counter_store;
mod metrics;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the counter store abstraction
pub use counter_store::{CounterStore, CounterStorePtr, StoreError};

/// Redis key holding the visit counter.
pub const VISITS_KEY: &str = "visits";
