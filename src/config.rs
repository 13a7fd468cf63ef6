// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! Every variable is optional and has a default. Values that are present but
//! malformed are treated as deployment errors and abort startup.

use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable, treating an empty value as unset.
///
/// Falls back to the provided default when the variable is missing or empty.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| $default.to_string())
    };
}

/// Reads an optional environment variable and parses it.
///
/// A missing or empty variable yields the default. A value that is present
/// but cannot be parsed fails with a message naming the variable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        match std::env::var($key).ok().filter(|v| !v.is_empty()) {
            Some(v) => v.parse::<$ty>().map_err(|e| {
                anyhow::anyhow!(concat!("Invalid configuration for ", $key, " ({:?}): {}"), v, e)
            })?,
            None => $default,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails because of a malformed
/// environment variable.
macro_rules! assert_invalid_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Invalid configuration for ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub redis: redis::RedisConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any variable is present but invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            redis: redis::RedisConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// HTTP listener and instance identity.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Interface to bind. Defaults to `0.0.0.0`.
        pub bind_host: String,

        /// Listen port. Defaults to 3000.
        pub port: u16,

        /// Identity reported as `pod` in responses, from `HOSTNAME`. Empty when unset.
        pub pod: String,
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `PORT` is set but is not a valid port number.
        pub fn from_env() -> Result<Self> {
            // ---
            let bind_host = optional_env!("API_BIND_HOST", "0.0.0.0");
            let port = optional_env_parse!("PORT", u16, 3000);
            let pod = std::env::var("HOSTNAME").unwrap_or_default();

            Ok(Self {
                bind_host,
                port,
                pod,
            })
        }

        /// Socket address string suitable for `TcpListener::bind`.
        pub fn bind_addr(&self) -> String {
            // ---
            format!("{}:{}", self.bind_host, self.port)
        }
    }
}
pub use self::server::ServerConfig;

// ============================================================
// Redis configuration
// ============================================================

mod redis {
    // ---
    use super::*;

    /// Port the counter store listens on. Not configurable.
    pub const REDIS_PORT: u16 = 6379;

    /// Redis connection settings for the counter store.
    #[derive(Debug, Clone)]
    pub struct RedisConfig {
        /// Redis host name, from `REDIS_HOST`. Defaults to `localhost`.
        pub host: String,

        /// Connection URL derived from `host` and [`REDIS_PORT`].
        pub url: String,
    }

    impl RedisConfig {
        /// Builds a [`RedisConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            let host = optional_env!("REDIS_HOST", "localhost");
            let url = format!("redis://{host}:{REDIS_PORT}");

            Ok(Self { host, url })
        }
    }
}
pub use self::redis::{RedisConfig, REDIS_PORT};

// ============================================================
// Tests
// ============================================================
