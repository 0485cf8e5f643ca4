//! Error taxonomy for the forwarding proxy.
//!
//! # Design Decisions
//! - Startup errors (config, bind) are fatal; per-request errors never are
//! - Per-request errors map to exactly one client-visible response class
//! - Transport failures are never retried on another connection

use std::time::Duration;

use thiserror::Error;

/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Invalid configuration. Fatal at startup.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Listener could not be bound. Fatal at startup.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// Inbound request failed protocol validation. Client error, not a
    /// system fault.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Upstream was not reachable within the dial timeout.
    #[error("upstream dial timed out after {timeout:?}")]
    DialTimeout { timeout: Duration },

    /// Connection reset, protocol violation, or read/write failure after
    /// the connection was established.
    #[error("upstream transport failure: {0}")]
    Transport(#[source] hyper_util::client::legacy::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProxyError>;

impl ProxyError {
    /// Classify a client error from the upstream transport.
    ///
    /// A connect-phase failure whose source chain bottoms out in a timed-out
    /// I/O operation is the dial timeout; everything else is a transport
    /// failure.
    pub(crate) fn from_client(err: hyper_util::client::legacy::Error, dial_timeout: Duration) -> Self {
        if err.is_connect() && source_is_timeout(&err) {
            ProxyError::DialTimeout {
                timeout: dial_timeout,
            }
        } else {
            ProxyError::Transport(err)
        }
    }
}

/// Walk the source chain looking for a timed-out I/O error.
fn source_is_timeout(err: &dyn std::error::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = cause.source();
    }
    false
}
