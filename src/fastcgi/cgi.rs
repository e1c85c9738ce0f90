//! CGI response head parsing.

use std::io;

/// STDOUT split into the CGI status and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl CgiResponse {
    /// Parse the CGI header block at the start of STDOUT.
    ///
    /// A missing `Status` header means 200.
    pub fn parse(stdout: &[u8]) -> io::Result<Self> {
        let (head, body) = split_head(stdout)
            .ok_or_else(|| invalid_data("response has no CGI header terminator".into()))?;

        let mut status = 200;
        for line in String::from_utf8_lossy(head).lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| invalid_data(format!("malformed CGI header line '{line}'")))?;
            if name.trim().eq_ignore_ascii_case("status") {
                let value = value.trim();
                status = value
                    .split_whitespace()
                    .next()
                    .and_then(|code| code.parse().ok())
                    .ok_or_else(|| invalid_data(format!("malformed Status header '{value}'")))?;
            }
        }

        Ok(Self {
            status,
            body: body.to_vec(),
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn split_head(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, 4));
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let (at, len) = match (crlf, lf) {
        (Some(a), Some(b)) => if a.0 <= b.0 { a } else { b },
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((&buf[..at], &buf[at + len..]))
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
