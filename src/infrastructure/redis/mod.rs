mod redis_store;


pub use redis_store::RedisCounterStore;

use crate::config::RedisConfig;
use crate::domain::CounterStorePtr;

/// Creates the Redis-backed counter store described by `config`.
///
/// Fails only when the URL itself is malformed. The first connection attempt
/// runs in the background, so neither an unreachable nor an unresponsive
/// server delays the caller. Must be called from within a Tokio runtime.
pub fn create_redis_store(config: &RedisConfig) -> anyhow::Result<CounterStorePtr> {
    // ---
    tracing::info!("Initializing Redis counter store at {}", config.url);
    let client = ::redis::Client::open(config.url.as_str())?;

    let store: CounterStorePtr = RedisCounterStore::connect(client);
    Ok(store)
}
