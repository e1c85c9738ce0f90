//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExporterConfig {
    /// Scrape settings shared by all pools.
    pub scrape: ScrapeConfig,

    /// Pools to scrape.
    pub pools: Vec<PoolConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Scrape settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Time budget per pool scrape in seconds, shared by connect and response.
    pub timeout_secs: u64,
}

impl ScrapeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self { timeout_secs: 3 }
    }
}

/// A single pool entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PoolConfig {
    /// Pool address, e.g. "tcp://127.0.0.1:9000" or "unix:///run/php/www.sock".
    pub address: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
