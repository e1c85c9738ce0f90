//! PHP-FPM status payload model.
//!
//! # Data Flow
//! ```text
//! FastCGI response body (JSON)
//!     → decoder.rs (serde_json, canonical PHP-FPM keys)
//!     → types.rs (PoolStatus + Process list)
//!         start time → timestamp.rs (bare epoch seconds)
//! ```

pub mod decoder;
pub mod timestamp;
pub mod types;

pub use decoder::{decode, encode};
pub use timestamp::Timestamp;
pub use types::{PoolStatus, Process, ProcessState, PROCESS_STATE_IDLE, PROCESS_STATE_RUNNING};
