//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Scrape core produces:
//!     → logging.rs (process-wide diagnostic sink, tracing by default)
//!     → metrics.rs (scrape durations, failures)
//!
//! Consumers:
//!     → stderr via tracing-subscriber (binary)
//!     → whatever recorder the embedding exporter installs
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{logger, set_logger, Logger, MemoryLogger, NoopLogger, TracingLogger};
