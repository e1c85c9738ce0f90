//! PHP-FPM pool status scraping library.
//!
//! Polls PHP-FPM status pages over FastCGI, decodes the `?json&full`
//! payload into typed snapshots and keeps per-pool failure tallies.

pub mod config;
pub mod error;
pub mod fastcgi;
pub mod observability;
pub mod pool;
pub mod scoreboard;
pub mod status;

pub use config::ExporterConfig;
pub use error::{ScrapeError, ScrapeErrorKind};
pub use observability::logging::set_logger;
pub use pool::{Pool, PoolManager};
pub use scoreboard::{calculate_scoreboard, Scoreboard};
pub use status::{PoolStatus, Process, ProcessState, Timestamp};
