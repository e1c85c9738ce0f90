//! Pool address parsing.
//!
//! Supported forms:
//! - `tcp://host:port`
//! - `unix:///path/to/php-fpm.sock`

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::error::{ScrapeError, ScrapeResult};

/// Where a pool's status page can be reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `host:port`, ready for `TcpStream::connect`.
    Tcp(String),
    /// Filesystem path of a Unix domain socket.
    Unix(PathBuf),
}

impl Endpoint {
    pub fn parse(address: &str) -> ScrapeResult<Self> {
        let url = Url::parse(address).map_err(|e| ScrapeError::address(address, e.to_string()))?;

        match url.scheme() {
            "tcp" => {
                let host = url
                    .host()
                    .filter(|h| !h.to_string().is_empty())
                    .ok_or_else(|| ScrapeError::address(address, "missing host"))?;
                let port = url
                    .port()
                    .ok_or_else(|| ScrapeError::address(address, "missing port"))?;
                Ok(Endpoint::Tcp(format!("{host}:{port}")))
            }
            "unix" => {
                if url.host_str().is_some_and(|h| !h.is_empty()) {
                    return Err(ScrapeError::address(
                        address,
                        "unix address must be unix:///absolute/path",
                    ));
                }
                let path = url.path();
                if path.is_empty() || path == "/" {
                    return Err(ScrapeError::address(address, "missing socket path"));
                }
                Ok(Endpoint::Unix(PathBuf::from(path)))
            }
            other => Err(ScrapeError::address(
                address,
                format!("unsupported scheme '{other}', expected tcp or unix"),
            )),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => f.write_str(addr),
            Endpoint::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}
