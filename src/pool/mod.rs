//! Pool scraping subsystem.
//!
//! # Data Flow
//! ```text
//! PoolManager::update()
//!     → one Pool::update() per pool, all polled concurrently
//!         → address.rs (tcp:// or unix:// → Endpoint)
//!         → fastcgi (status request, bounded by the timeout)
//!         → status::decode (JSON → PoolStatus)
//!         → success: replace snapshot, clear last error
//!           failure: keep snapshot, set last error, failures += 1
//!     → join: return once every pool is done
//! ```
//!
//! # Design Decisions
//! - Each scrape holds the only `&mut` to its pool, so no locking is needed
//! - No retries; a hanging pool costs at most its own timeout
//! - `add` and `update` both take `&mut self`, so they cannot interleave

pub mod address;
pub mod manager;
pub mod scraper;

pub use address::Endpoint;
pub use manager::PoolManager;
pub use scraper::{Pool, DEFAULT_TIMEOUT};
