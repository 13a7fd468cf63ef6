pub mod prometheus;

// Re-export the factory function for easy access
pub use self::prometheus::create as create_prom_metrics;
