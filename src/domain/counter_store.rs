use std::sync::Arc;
use thiserror::Error;

/// Failure of a single round trip to the counter store.
///
/// The `Display` text is what clients see in the `error` field of a
/// 500 response, so variants carry the backend's own message.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached, or the connection dropped mid-request.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The store answered with an error (wrong type, timeout, server error).
    #[error("store command failed: {0}")]
    Command(String),
}

/// Abstraction over the external key-value store holding integer counters.
#[async_trait::async_trait]
pub trait CounterStore: Send + Sync {
    // ---
    /// Read a counter. `None` means the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Atomically increment a counter by one and return the new value.
    ///
    /// An absent key is treated as zero, so the first call returns 1.
    async fn increment(&self, key: &str) -> Result<i64, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Type alias for any backend that implements CounterStore.
pub type CounterStorePtr = Arc<dyn CounterStore>;
