//! Shared utilities for integration tests: an in-process PHP-FPM mock.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Scenario payload with one process in an unknown state.
#[allow(dead_code)]
pub const WWW_PAYLOAD: &str = r#"{"pool":"www","start time":1000000000,"processes":[{"pid":1,"state":"Idle"},{"pid":2,"state":"Running"},{"pid":3,"state":"Zombie"}]}"#;

/// What the mock writes on STDOUT, after `delay`.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub delay: Duration,
}

impl MockReply {
    /// A 200 JSON response, as php-fpm's status page sends it.
    pub fn json(body: &str) -> Self {
        Self {
            stdout: format!("Content-type: application/json\r\n\r\n{body}").into_bytes(),
            stderr: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn raw(stdout: &str) -> Self {
        Self {
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.as_bytes().to_vec();
        self
    }
}

const BEGIN_REQUEST: u8 = 1;
const END_REQUEST: u8 = 3;
const PARAMS: u8 = 4;
const STDIN: u8 = 5;
const STDOUT: u8 = 6;
const STDERR: u8 = 7;

/// A request as the mock saw it.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub request_id: u16,
    pub params: Vec<(String, String)>,
}

/// Read one request; returns once the empty STDIN arrives.
pub async fn read_request<S>(socket: &mut S) -> std::io::Result<SeenRequest>
where
    S: AsyncRead + Unpin,
{
    let mut seen = SeenRequest::default();
    let mut params = Vec::new();
    loop {
        let mut header = [0u8; 8];
        socket.read_exact(&mut header).await?;
        let record_type = header[1];
        let request_id = u16::from_be_bytes([header[2], header[3]]);
        let content_len = u16::from_be_bytes([header[4], header[5]]) as usize;
        let mut content = vec![0u8; content_len + header[6] as usize];
        socket.read_exact(&mut content).await?;
        content.truncate(content_len);

        match record_type {
            BEGIN_REQUEST => seen.request_id = request_id,
            PARAMS => params.extend_from_slice(&content),
            STDIN if content.is_empty() => break,
            _ => {}
        }
    }
    seen.params = decode_pairs(&params);
    Ok(seen)
}

fn decode_pairs(mut buf: &[u8]) -> Vec<(String, String)> {
    fn length(buf: &mut &[u8]) -> usize {
        if buf[0] & 0x80 == 0 {
            let len = buf[0] as usize;
            *buf = &buf[1..];
            len
        } else {
            let len = u32::from_be_bytes([buf[0] & 0x7f, buf[1], buf[2], buf[3]]) as usize;
            *buf = &buf[4..];
            len
        }
    }

    let mut pairs = Vec::new();
    while !buf.is_empty() {
        let name_len = length(&mut buf);
        let value_len = length(&mut buf);
        let name = String::from_utf8_lossy(&buf[..name_len]).into_owned();
        let value = String::from_utf8_lossy(&buf[name_len..name_len + value_len]).into_owned();
        buf = &buf[name_len + value_len..];
        pairs.push((name, value));
    }
    pairs
}

fn write_record(out: &mut Vec<u8>, record_type: u8, request_id: u16, content: &[u8]) {
    let [id_hi, id_lo] = request_id.to_be_bytes();
    let [len_hi, len_lo] = (content.len() as u16).to_be_bytes();
    out.extend_from_slice(&[1, record_type, id_hi, id_lo, len_hi, len_lo, 0, 0]);
    out.extend_from_slice(content);
}

async fn write_reply<S>(socket: &mut S, request_id: u16, reply: &MockReply) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let mut out = Vec::new();
    for chunk in reply.stdout.chunks(4096) {
        write_record(&mut out, STDOUT, request_id, chunk);
    }
    write_record(&mut out, STDOUT, request_id, &[]);
    if !reply.stderr.is_empty() {
        write_record(&mut out, STDERR, request_id, &reply.stderr);
        write_record(&mut out, STDERR, request_id, &[]);
    }
    write_record(&mut out, END_REQUEST, request_id, &[0, 0, 0, 0, 0, 0, 0, 0]);
    socket.write_all(&out).await?;
    socket.shutdown().await
}

async fn serve<S>(mut socket: S, reply: MockReply)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Ok(seen) = read_request(&mut socket).await else {
        return;
    };
    tokio::time::sleep(reply.delay).await;
    let _ = write_reply(&mut socket, seen.request_id, &reply).await;
}

/// Start a mock php-fpm on an ephemeral TCP port that answers every
/// connection with the reply produced by `f`.
pub async fn start_programmable_fpm<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockReply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let reply = f().await;
                        serve(socket, reply).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock php-fpm that always answers with `reply`.
pub async fn start_mock_fpm(reply: MockReply) -> SocketAddr {
    start_programmable_fpm(move || {
        let reply = reply.clone();
        async move { reply }
    })
    .await
}

/// Start a listener that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_fpm() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Start a mock php-fpm on a Unix socket inside `dir`.
#[cfg(unix)]
#[allow(dead_code)]
pub fn start_unix_fpm(dir: &std::path::Path, reply: MockReply) -> std::path::PathBuf {
    let path = dir.join("php-fpm.sock");
    let listener = tokio::net::UnixListener::bind(&path).unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let reply = reply.clone();
            tokio::spawn(serve(socket, reply));
        }
    });

    path
}

#[allow(dead_code)]
pub fn tcp_address(addr: SocketAddr) -> String {
    format!("tcp://{addr}")
}
