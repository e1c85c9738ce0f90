//! Pool registry and concurrent fan-out.

use std::time::{Duration, Instant};

use futures_util::future::join_all;
use serde::Serialize;

use crate::observability::logging::log_debug;
use crate::observability::metrics;
use crate::pool::scraper::{Pool, DEFAULT_TIMEOUT};

/// Owns every configured pool, in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct PoolManager {
    pools: Vec<Pool>,
    #[serde(skip)]
    timeout: Duration,
}

impl Default for PoolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolManager {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Manager whose scrapes are bounded by `timeout` instead of the default.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            pools: Vec::new(),
            timeout,
        }
    }

    /// Register a pool. The address is only validated when it is scraped.
    pub fn add(&mut self, address: impl Into<String>) -> Pool {
        let pool = Pool::new(address);
        self.pools.push(pool.clone());
        pool
    }

    /// Scrape every pool concurrently and wait for all of them.
    ///
    /// Per-pool failures are recorded on the pool itself; this never fails.
    pub async fn update(&mut self) {
        let started = Instant::now();
        let timeout = self.timeout;

        let results = join_all(
            self.pools
                .iter_mut()
                .map(|pool| pool.update_with_timeout(timeout)),
        )
        .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        metrics::record_pools_updated(self.pools.len());
        log_debug!(
            "Updated {} pool(s) in {:?} ({} failed)",
            self.pools.len(),
            started.elapsed(),
            failed
        );
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut [Pool] {
        &mut self.pools
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
