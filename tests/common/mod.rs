//! Shared utilities for relay integration tests.
//!
//! Mock upstreams are raw TCP servers speaking just enough HTTP/1.1 to
//! script redirect chains and record what the relay actually sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use cors_relay::config::RelayConfig;
use cors_relay::http::HttpServer;

/// A request as observed by a mock upstream.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: String,
    /// Path plus query, exactly as sent on the request line.
    pub target: String,
    pub body: Vec<u8>,
}

/// The response a mock upstream script produces for one request.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl UpstreamResponse {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn redirect(status: u16, location: &str) -> Self {
        Self {
            status,
            headers: vec![("Location".to_string(), location.to_string())],
            body: String::new(),
        }
    }
}

/// Start a scriptable mock upstream on an ephemeral port.
///
/// The script runs once per request; connections close after one exchange.
pub async fn start_upstream<F>(script: F) -> SocketAddr
where
    F: Fn(UpstreamRequest) -> UpstreamResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let script = Arc::new(script);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let script = script.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, script).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn serve_one<F>(mut socket: TcpStream, script: Arc<F>) -> std::io::Result<()>
where
    F: Fn(UpstreamRequest) -> UpstreamResponse + Send + Sync + 'static,
{
    let request = read_request(&mut socket).await?;
    let response = script(request);
    write_response(&mut socket, &response).await?;
    socket.shutdown().await
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<UpstreamRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(UpstreamRequest {
        method,
        target,
        body,
    })
}

async fn write_response(socket: &mut TcpStream, response: &UpstreamResponse) -> std::io::Result<()> {
    let reason = match response.status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    };

    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, reason);
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body.len()
    ));

    socket.write_all(head.as_bytes()).await?;
    socket.write_all(response.body.as_bytes()).await
}

/// Start a relay on an ephemeral port, pointed at `upstream_url`.
pub async fn start_relay_at(upstream_url: String, max_redirects: u32) -> SocketAddr {
    let config = RelayConfig {
        upstream_url,
        listen_port: 0,
        max_redirects,
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Start a relay pointed at the root of a mock upstream.
pub async fn start_relay(upstream: SocketAddr, max_redirects: u32) -> SocketAddr {
    start_relay_at(format!("http://{}/", upstream), max_redirects).await
}

/// A reqwest client suitable for talking to the relay under test.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
