//! Scrape self-instrumentation.
//!
//! # Metrics
//! - `phpfpm_scrape_duration_seconds` (histogram): time spent per scrape, by pool
//! - `phpfpm_scrape_failures_total` (counter): failed scrapes, by pool and error kind
//! - `phpfpm_pools_updated` (gauge): pools covered by the last `update()`
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; installing a recorder is up to the embedding exporter
//! - Labels are the pool address and a stable error label

use std::time::Duration;

pub fn record_scrape_duration(address: &str, elapsed: Duration) {
    metrics::histogram!("phpfpm_scrape_duration_seconds", "pool" => address.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_scrape_failure(address: &str, kind: &'static str) {
    metrics::counter!(
        "phpfpm_scrape_failures_total",
        "pool" => address.to_string(),
        "kind" => kind
    )
    .increment(1);
}

pub fn record_pools_updated(count: usize) {
    metrics::gauge!("phpfpm_pools_updated").set(count as f64);
}
