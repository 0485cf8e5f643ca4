//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults so a zero-config start
//! is valid; the CLI flags overlay the two externally visible knobs.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (loopback port).
    pub listener: ListenerConfig,

    /// Fixed upstream endpoint and outbound connection cap.
    pub upstream: UpstreamConfig,

    /// Timeout configuration for the outbound transport.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
///
/// The proxy only ever listens on loopback; the local client process is the
/// sole intended peer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Port to listen on for local client connections.
    pub listen_port: u16,
}

impl ListenerConfig {
    /// Full loopback bind address for the configured port.
    pub fn bind_address(&self) -> String {
        format!("127.0.0.1:{}", self.listen_port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { listen_port: 19080 }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Host (optionally host:port) every request is forwarded to.
    pub server_host: String,

    /// Maximum simultaneously in-use outbound connections/streams.
    /// Requests beyond the cap wait; they never fail.
    pub max_in_flight: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server_host: "upstream.example.com".to_string(),
            max_in_flight: 16,
        }
    }
}

/// Timeout configuration for the outbound transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Dial (connection establishment) timeout in seconds.
    pub dial_secs: u64,

    /// TCP keep-alive probe interval in seconds.
    pub keep_alive_secs: u64,

    /// How long an idle non-multiplexed connection stays pooled before it
    /// is closed and discarded, in seconds.
    pub pool_idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            dial_secs: 600,
            keep_alive_secs: 30,
            pool_idle_secs: 30,
        }
    }
}
