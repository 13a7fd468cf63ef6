use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{CounterStore, StoreError};

/// A live connection tagged with the attempt that opened it.
struct CachedConnection {
    generation: u64,
    conn: MultiplexedConnection,
}

/// Redis-backed [`CounterStore`].
///
/// Holds a single multiplexed connection shared by every request. The first
/// connection attempt runs in the background (see [`RedisCounterStore::connect`]);
/// if it fails, or the connection later drops, the next operation reconnects.
/// Operations themselves are never retried.
pub struct RedisCounterStore {
    // ---
    client: Client,
    slot: RwLock<Option<CachedConnection>>,
    generations: AtomicU64,
}

impl RedisCounterStore {
    // ---
    /// Build a store with no connection; the first operation opens one.
    pub fn new(client: Client) -> Self {
        // ---
        Self {
            client,
            slot: RwLock::new(None),
            generations: AtomicU64::new(0),
        }
    }

    /// Build the store and start the initial connection attempt in the background.
    ///
    /// Returns immediately, so an unreachable or unresponsive Redis never
    /// delays startup. A failed attempt is logged and requests fail at call
    /// time until Redis is reachable. Must be called from within a Tokio runtime.
    pub fn connect(client: Client) -> Arc<Self> {
        // ---
        let store = Arc::new(Self::new(client));

        let background = Arc::clone(&store);
        tokio::spawn(async move {
            match background.connection().await {
                Ok(_) => tracing::info!("Connected to Redis"),
                Err(err) => tracing::error!("Redis unavailable at startup, continuing: {}", err),
            }
        });

        store
    }

    /// Returns the cached connection and its generation, opening one if none is cached.
    ///
    /// The slot lock is never held while connecting: a hung attempt stalls
    /// only the request that made it.
    pub(super) async fn connection(&self) -> Result<(u64, MultiplexedConnection), StoreError> {
        // ---
        if let Some(cached) = self.slot.read().await.as_ref() {
            return Ok((cached.generation, cached.conn.clone()));
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                to_store_error(err)
            })?;

        let mut slot = self.slot.write().await;
        if let Some(cached) = slot.as_ref() {
            // Another request connected first; ours is dropped.
            return Ok((cached.generation, cached.conn.clone()));
        }

        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        *slot = Some(CachedConnection {
            generation,
            conn: conn.clone(),
        });
        tracing::debug!(generation, "Cached new Redis connection");

        Ok((generation, conn))
    }

    /// Empties the slot if it still holds the connection of `generation`.
    pub(super) async fn discard(&self, generation: u64) {
        // ---
        let mut slot = self.slot.write().await;
        if slot.as_ref().is_some_and(|cached| cached.generation == generation) {
            tracing::warn!(generation, "Discarding dead Redis connection");
            *slot = None;
        }
    }

    /// Converts a command failure, discarding the connection it ran on when it is dead.
    async fn command_failed(&self, generation: u64, err: RedisError) -> StoreError {
        // ---
        tracing::error!("Redis command failed: {:?}", err);

        if err.is_connection_dropped() || err.is_io_error() {
            self.discard(generation).await;
        }
        to_store_error(err)
    }

    #[cfg(test)]
    pub(super) async fn cached_generation(&self) -> Option<u64> {
        self.slot.read().await.as_ref().map(|cached| cached.generation)
    }

    #[cfg(test)]
    pub(super) fn slot_is_unlocked(&self) -> bool {
        self.slot.try_write().is_ok()
    }
}

fn to_store_error(err: RedisError) -> StoreError {
    // ---
    if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}

#[async_trait::async_trait]
impl CounterStore for RedisCounterStore {
    // ---
    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        // ---
        let (generation, mut conn) = self.connection().await?;

        let result: redis::RedisResult<Option<i64>> = conn.get(key).await;
        match result {
            Ok(value) => Ok(value),
            Err(err) => Err(self.command_failed(generation, err).await),
        }
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        // ---
        let (generation, mut conn) = self.connection().await?;

        let result: redis::RedisResult<i64> = conn.incr(key, 1).await;
        match result {
            Ok(value) => Ok(value),
            Err(err) => Err(self.command_failed(generation, err).await),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // ---
        let (generation, mut conn) = self.connection().await?;

        let result: redis::RedisResult<String> = conn.ping().await;
        match result {
            Ok(_) => Ok(()),
            Err(err) => Err(self.command_failed(generation, err).await),
        }
    }
}
