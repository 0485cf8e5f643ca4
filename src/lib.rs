//! muxgate — a local connection-condensing forwarding proxy.
//!
//! Accepts HTTP/1.1 connections from a local client process and forwards
//! every request to a single fixed upstream over HTTPS, opportunistically
//! upgraded to HTTP/2 so concurrent requests share a small, capped set of
//! outbound connections instead of one socket each.
//!
//! # Architecture Overview
//!
//! ```text
//!   local client (HTTP/1.1, one request per connection)
//!        │  unbounded inbound connections
//!        ▼
//!   ┌──────────┐   ┌──────────┐   ┌───────────────┐
//!   │   http   │──▶│ routing  │──▶│   upstream    │
//!   │  server  │   │ director │   │  pool+client  │──▶ fixed upstream
//!   └──────────┘   └──────────┘   └───────────────┘    (HTTPS, h2 when
//!        ▲              cap: 16 in-use conns/streams    negotiated)
//!        │
//!   ┌────────────────────────────────────────────┐
//!   │  lifecycle (fd limit, signal suppression)  │
//!   │  observability (structured logging)        │
//!   │  config (flags → validated, immutable)     │
//!   └────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use routing::UpstreamTarget;
