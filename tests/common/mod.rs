//! Shared utilities for integration testing.
//!
//! Mock upstreams are raw TCP servers so tests can observe exactly what
//! the proxy put on the wire.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::uri::Scheme;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use muxgate::config::ProxyConfig;
use muxgate::http::HttpServer;
use muxgate::routing::UpstreamTarget;

/// Read one request head (through the blank line) off a socket.
pub async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&head).to_string()
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Start a mock upstream at a specific address that records each request
/// head and returns a fixed body.
pub async fn start_recording_upstream_at(
    addr: SocketAddr,
    response: &'static str,
) -> Arc<Mutex<Vec<String>>> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let heads = Arc::new(Mutex::new(Vec::new()));
    let record = heads.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let record = record.clone();
                    tokio::spawn(async move {
                        let head = read_request_head(&mut socket).await;
                        record.lock().await.push(head);
                        let _ = socket
                            .write_all(http_response("200 OK", response).as_bytes())
                            .await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    heads
}

/// Start a recording mock upstream on an ephemeral port.
pub async fn start_recording_upstream(
    response: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let addr = ephemeral_addr().await;
    let heads = start_recording_upstream_at(addr, response).await;
    (addr, heads)
}

/// Start a mock upstream that answers every request with the given raw
/// HTTP/1.1 response bytes.
pub async fn start_raw_upstream(raw_response: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let raw = Arc::new(raw_response);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let raw = raw.clone();
                    tokio::spawn(async move {
                        let _ = read_request_head(&mut socket).await;
                        let _ = socket.write_all(raw.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that holds every request for `delay` before
/// responding, and tracks the maximum number of simultaneously in-flight
/// requests it observed.
pub async fn start_slow_upstream(delay: Duration) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let active = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));
    let observed = max_seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let active = active.clone();
                    let max_seen = max_seen.clone();
                    tokio::spawn(async move {
                        let _ = read_request_head(&mut socket).await;
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(delay).await;
                        let _ = socket
                            .write_all(http_response("200 OK", "held").as_bytes())
                            .await;
                        let _ = socket.shutdown().await;
                        active.fetch_sub(1, Ordering::SeqCst);
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, observed)
}

/// Spawn the proxy on an ephemeral loopback port, forwarding to the given
/// plain-HTTP upstream address. Returns the proxy's address.
pub async fn start_proxy(upstream: SocketAddr, max_in_flight: usize) -> SocketAddr {
    let mut config = ProxyConfig::default();
    config.upstream.server_host = upstream.to_string();
    config.upstream.max_in_flight = max_in_flight;

    let target = UpstreamTarget::with_scheme(Scheme::HTTP, &upstream.to_string()).unwrap();
    let server = HttpServer::with_target(config, target);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Reserve an ephemeral loopback address and release it.
pub async fn ephemeral_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
