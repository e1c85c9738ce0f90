//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0)
//! - Check every pool address parses as `tcp://` or `unix://`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ExporterConfig;
use crate::pool::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("scrape.timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("pools[{index}]: {reason}")]
    InvalidPool { index: usize, reason: String },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.scrape.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (index, pool) in config.pools.iter().enumerate() {
        if let Err(e) = Endpoint::parse(&pool.address) {
            errors.push(ValidationError::InvalidPool {
                index,
                reason: e.to_string(),
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
