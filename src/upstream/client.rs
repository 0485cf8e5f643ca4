//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Own the single client used for all upstream traffic
//! - Configure dial timeout, TCP keep-alive, and idle recycling
//! - Negotiate HTTP/2 opportunistically via ALPN
//! - Classify transport failures (dial timeout vs transport error)
//!
//! # Design Decisions
//! - Exactly one forwarding attempt per request; a failure after a pooled
//!   connection was reused is surfaced, not silently retried
//! - Connections negotiated as HTTP/2 carry requests as independent
//!   streams; HTTP/1.1 connections return to the idle set until the idle
//!   timeout lapses

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, Version};
use hyper::body::Incoming;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::TimeoutConfig;
use crate::error::{ProxyError, Result};

/// Protocol negotiated for an outbound connection.
///
/// Tagged at connection establishment via ALPN; observed per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamProtocol {
    /// One request per connection at a time.
    Http1,
    /// Multiplexed; many concurrent streams share one socket.
    Http2,
}

impl UpstreamProtocol {
    /// Tag from the HTTP version the response arrived on.
    pub fn from_version(version: Version) -> Self {
        if version == Version::HTTP_2 {
            UpstreamProtocol::Http2
        } else {
            UpstreamProtocol::Http1
        }
    }

    /// Whether requests share the underlying socket as independent streams.
    pub fn is_multiplexed(&self) -> bool {
        matches!(self, UpstreamProtocol::Http2)
    }
}

impl std::fmt::Display for UpstreamProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamProtocol::Http1 => write!(f, "http/1.1"),
            UpstreamProtocol::Http2 => write!(f, "h2"),
        }
    }
}

/// The shared outbound client.
///
/// Wraps a pooled hyper client: idle HTTP/1.1 connections are reused until
/// the idle timeout lapses, and a live HTTP/2 session carries all
/// concurrent requests as streams instead of new sockets.
pub struct UpstreamClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    dial_timeout: Duration,
}

impl UpstreamClient {
    /// Build the client from timeout configuration.
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let dial_timeout = Duration::from_secs(timeouts.dial_secs);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(dial_timeout));
        connector.set_keepalive(Some(Duration::from_secs(timeouts.keep_alive_secs)));
        connector.enforce_http(false);

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(timeouts.pool_idle_secs))
            .build(https);

        Self {
            client,
            dial_timeout,
        }
    }

    /// Send one request upstream. Exactly one attempt; no retry on another
    /// connection.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Incoming>> {
        self.client
            .request(request)
            .await
            .map_err(|e| ProxyError::from_client(e, self.dial_timeout))
    }
}
