//! Single-pool scraping.
//!
//! # Responsibilities
//! - Resolve the pool address to a TCP or Unix endpoint
//! - Run one FastCGI status request against it, bounded by a timeout
//! - Replace the pool snapshot on success; record the error otherwise
//!
//! # Design Decisions
//! - A failed scrape never touches the last good snapshot
//! - The failure counter is a lifetime tally and is never reset
//! - The connection is dropped before `update` returns, whatever the outcome

use std::future::Future;
use std::io;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite};
#[cfg(unix)]
use tokio::net::UnixStream;
use tokio::net::TcpStream;
use tokio::time::timeout_at;

use crate::error::{ScrapeError, ScrapeResult};
use crate::fastcgi;
use crate::observability::logging::{log_debug, log_error};
use crate::observability::metrics;
use crate::pool::address::Endpoint;
use crate::scoreboard::{calculate_scoreboard, Scoreboard};
use crate::status::{self, PoolStatus};

/// Connect and response timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Value sent as `SERVER_SOFTWARE`.
pub const SERVER_SOFTWARE: &str = concat!("rust / phpfpm-status ", env!("CARGO_PKG_VERSION"));

/// CGI parameters expected by PHP-FPM's `pm.status_path` page.
pub fn status_request_params() -> [(&'static str, &'static str); 7] {
    [
        ("SCRIPT_FILENAME", "/status"),
        ("SCRIPT_NAME", "/status"),
        ("SERVER_SOFTWARE", SERVER_SOFTWARE),
        ("REMOTE_ADDR", "127.0.0.1"),
        ("QUERY_STRING", "json&full"),
        ("REQUEST_METHOD", "GET"),
        ("CONTENT_LENGTH", "0"),
    ]
}

/// A PHP-FPM pool reachable at one address.
#[derive(Debug, Clone, Serialize)]
pub struct Pool {
    /// e.g. `tcp://127.0.0.1:9000` or `unix:///tmp/php-fpm.sock`.
    #[serde(skip)]
    pub address: String,
    #[serde(flatten)]
    pub status: PoolStatus,
    /// Error of the most recent scrape, `None` after a success.
    #[serde(skip)]
    pub last_error: Option<ScrapeError>,
    /// Failed scrapes over the pool's lifetime.
    #[serde(skip)]
    pub scrape_failures: u64,
}

impl Pool {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status: PoolStatus::default(),
            last_error: None,
            scrape_failures: 0,
        }
    }

    /// Scrape the pool once with the default timeout.
    pub async fn update(&mut self) -> ScrapeResult<()> {
        self.update_with_timeout(DEFAULT_TIMEOUT).await
    }

    /// Scrape the pool once. Connect and the request/response exchange share
    /// a single `limit`.
    pub async fn update_with_timeout(&mut self, limit: Duration) -> ScrapeResult<()> {
        let started = Instant::now();
        let result = self.scrape(limit).await;
        metrics::record_scrape_duration(&self.address, started.elapsed());

        match result {
            Ok(status) => {
                self.status = status;
                self.last_error = None;
                Ok(())
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        calculate_scoreboard(&self.status.processes)
    }

    pub fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }

    fn record_failure(&mut self, err: ScrapeError) -> ScrapeError {
        self.scrape_failures += 1;
        self.last_error = Some(err.clone());
        metrics::record_scrape_failure(&self.address, err.label());
        log_error!("Pool[{}]: {}", self.address, err);
        err
    }

    async fn scrape(&self, limit: Duration) -> ScrapeResult<PoolStatus> {
        let endpoint = Endpoint::parse(&self.address)?;
        let deadline = Deadline::after(limit);
        let body = match &endpoint {
            Endpoint::Tcp(addr) => {
                let stream = connect(&endpoint, deadline, TcpStream::connect(addr.as_str())).await?;
                exchange(&endpoint, stream, deadline).await?
            }
            #[cfg(unix)]
            Endpoint::Unix(path) => {
                let stream = connect(&endpoint, deadline, UnixStream::connect(path)).await?;
                exchange(&endpoint, stream, deadline).await?
            }
            #[cfg(not(unix))]
            Endpoint::Unix(_) => {
                return Err(ScrapeError::address(
                    &self.address,
                    "unix sockets are not supported on this platform",
                ));
            }
        };

        log_debug!("Pool[{}]: {}", self.address, String::from_utf8_lossy(&body));
        status::decode(&body)
    }
}

/// One time budget shared by connect and the request/response exchange.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: tokio::time::Instant,
    limit: Duration,
}

impl Deadline {
    fn after(limit: Duration) -> Self {
        Self {
            at: tokio::time::Instant::now() + limit,
            limit,
        }
    }

    fn elapsed_error(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::TimedOut,
            format!("timed out after {:?}", self.limit),
        )
    }
}

async fn connect<S, F>(endpoint: &Endpoint, deadline: Deadline, fut: F) -> ScrapeResult<S>
where
    F: Future<Output = io::Result<S>>,
{
    match timeout_at(deadline.at, fut).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ScrapeError::connect(endpoint.to_string(), e)),
        Err(_) => Err(ScrapeError::connect(endpoint.to_string(), deadline.elapsed_error())),
    }
}

/// Send the status request and return the response body. The stream is
/// consumed and closed on return.
async fn exchange<S>(endpoint: &Endpoint, stream: S, deadline: Deadline) -> ScrapeResult<Vec<u8>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let transport = |e: io::Error| ScrapeError::transport(endpoint.to_string(), e);

    let params = status_request_params();
    let response = match timeout_at(deadline.at, fastcgi::get(stream, &params)).await {
        Ok(result) => result.map_err(transport)?,
        Err(_) => return Err(transport(deadline.elapsed_error())),
    };

    if !response.stderr.is_empty() {
        log_debug!(
            "Pool[{}]: FastCGI stderr: {}",
            endpoint,
            String::from_utf8_lossy(&response.stderr).trim_end()
        );
    }

    let cgi = response.into_cgi().map_err(transport)?;
    if !cgi.is_success() {
        return Err(transport(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("status page answered with status {}", cgi.status),
        )));
    }
    Ok(cgi.body)
}
