//! FastCGI status request.
//!
//! # Data Flow
//! ```text
//! CGI params (name/value)
//!     → fastcgi-client (BEGIN_REQUEST, PARAMS, STDIN; STDOUT/STDERR until END_REQUEST)
//!     → cgi.rs (CGI header split) → body bytes
//! ```
//!
//! # Design Decisions
//! - One request per connection; the stream is consumed by the call
//! - Errors are plain `io::Error`s so callers map them onto one variant
//! - Timeouts belong to the caller

pub mod cgi;

use std::io;

use fastcgi_client::{Client, Params, Request};
use tokio::io::{AsyncRead, AsyncWrite};

pub use cgi::CgiResponse;

/// STDOUT and STDERR collected for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Response {
    pub fn into_cgi(self) -> io::Result<CgiResponse> {
        CgiResponse::parse(&self.stdout)
    }
}

/// Send a GET-style request with an empty STDIN and read the response until
/// END_REQUEST.
pub async fn get<S>(stream: S, params: &[(&'static str, &'static str)]) -> io::Result<Response>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut request_params = Params::default();
    for &(name, value) in params {
        request_params.insert(name.into(), value.into());
    }

    let client = Client::new(stream);
    let output = client
        .execute_once(Request::new(request_params, &mut tokio::io::empty()))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(Response {
        stdout: output.stdout.unwrap_or_default(),
        stderr: output.stderr.unwrap_or_default(),
    })
}
