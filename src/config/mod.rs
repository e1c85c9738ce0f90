//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//!     → merged with CLI flags in main.rs
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ExporterConfig, ObservabilityConfig, PoolConfig, ScrapeConfig};
pub use validation::{validate_config, ValidationError};
