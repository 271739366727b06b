//! Gateway configuration types.
//!
//! This module defines configuration structures for the HTTP gateway and
//! how they are read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:3001").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding the `RocksDB` database.
    #[serde(default = "GatewayConfig::default_data_dir")]
    pub data_dir: PathBuf,

    /// Allowed CORS origins.
    #[serde(default = "GatewayConfig::default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// How many times to try opening the store at startup.
    #[serde(default = "GatewayConfig::default_connect_attempts")]
    pub store_connect_attempts: u32,

    /// Pause between store open attempts, in milliseconds.
    #[serde(default = "GatewayConfig::default_connect_backoff")]
    pub store_connect_backoff_ms: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:3001".to_string()
    }

    fn default_data_dir() -> PathBuf {
        PathBuf::from("./data/shift-roster")
    }

    fn default_cors_origins() -> Vec<String> {
        vec!["*".to_string()]
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    const fn default_connect_attempts() -> u32 {
        5
    }

    const fn default_connect_backoff() -> u64 {
        1000
    }

    /// Load configuration from process environment variables.
    ///
    /// See [`from_lookup`](Self::from_lookup) for the variables read.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    ///
    /// Reads `LISTEN_ADDR` (or `PORT`, binding all interfaces), `DATA_DIR`,
    /// `CORS_ORIGINS` (comma-separated), `MAX_BODY_BYTES`,
    /// `REQUEST_TIMEOUT_SECONDS`, `STORE_CONNECT_ATTEMPTS` and
    /// `STORE_CONNECT_BACKOFF_MS`. Unparseable numbers are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("LISTEN_ADDR") {
            config.listen_addr = addr;
        } else if let Some(port) = lookup("PORT") {
            config.listen_addr = format!("0.0.0.0:{port}");
        }
        if let Some(dir) = lookup("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        parse_into(&lookup, "MAX_BODY_BYTES", &mut config.max_body_bytes);
        parse_into(&lookup, "REQUEST_TIMEOUT_SECONDS", &mut config.request_timeout_seconds);
        parse_into(&lookup, "STORE_CONNECT_ATTEMPTS", &mut config.store_connect_attempts);
        parse_into(&lookup, "STORE_CONNECT_BACKOFF_MS", &mut config.store_connect_backoff_ms);

        config
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the store open backoff as a `Duration`.
    #[must_use]
    pub fn store_connect_backoff(&self) -> Duration {
        Duration::from_millis(self.store_connect_backoff_ms)
    }
}

fn parse_into<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "Ignoring unparseable setting"),
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            data_dir: Self::default_data_dir(),
            cors_origins: Self::default_cors_origins(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
            store_connect_attempts: Self::default_connect_attempts(),
            store_connect_backoff_ms: Self::default_connect_backoff(),
        }
    }
}
