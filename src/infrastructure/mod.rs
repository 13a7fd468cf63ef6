pub mod metrics;
mod redis;

// Re-export the factory functions for easy access
pub use self::metrics::create_prom_metrics;
pub use self::redis::create_redis_store;
