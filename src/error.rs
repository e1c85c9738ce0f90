//! Scrape error definitions.
//!
//! Every variant is scoped to one scrape attempt of one pool. None of them is
//! fatal: the scraper records the error on the pool and moves on.

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while scraping a single pool.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// The pool address is not a well-formed URI or uses an unsupported scheme.
    #[error("invalid pool address '{address}': {reason}")]
    Address { address: String, reason: String },

    /// Connection establishment failed or timed out.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// I/O or FastCGI protocol failure during the request/response exchange.
    #[error("transport error talking to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// The status payload is malformed or a field has the wrong type.
    #[error("malformed status payload at line {line} column {column}: {message}")]
    Decode {
        message: String,
        line: usize,
        column: usize,
    },
}

/// Fieldless classification of a [`ScrapeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapeErrorKind {
    Address,
    Connect,
    Transport,
    Decode,
}

impl ScrapeError {
    pub fn address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Address {
            address: address.into(),
            reason: reason.into(),
        }
    }

    pub fn connect(endpoint: impl Into<String>, source: io::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source: Arc::new(source),
        }
    }

    pub fn transport(endpoint: impl Into<String>, source: io::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: Arc::new(source),
        }
    }

    pub fn kind(&self) -> ScrapeErrorKind {
        match self {
            Self::Address { .. } => ScrapeErrorKind::Address,
            Self::Connect { .. } => ScrapeErrorKind::Connect,
            Self::Transport { .. } => ScrapeErrorKind::Transport,
            Self::Decode { .. } => ScrapeErrorKind::Decode,
        }
    }

    /// Stable lowercase label, used for metric labels.
    pub fn label(&self) -> &'static str {
        match self.kind() {
            ScrapeErrorKind::Address => "address",
            ScrapeErrorKind::Connect => "connect",
            ScrapeErrorKind::Transport => "transport",
            ScrapeErrorKind::Decode => "decode",
        }
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Result type for scrape operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;
