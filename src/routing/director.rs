//! Request director.
//!
//! # Responsibilities
//! - Rewrite every inbound request to the fixed upstream target
//! - Replace URI scheme, authority, and the Host header
//! - Leave every other request field untouched
//!
//! # Design Decisions
//! - The target is resolved and validated once at startup
//! - The rewrite is a pure transformation and never fails at request time

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderValue, Request, Uri};

use crate::error::{ProxyError, Result};

/// The fixed upstream endpoint every request is redirected to.
///
/// Immutable for the process lifetime; shared read-only by every request.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
    host_value: HeaderValue,
}

impl UpstreamTarget {
    /// Build the production target: always HTTPS.
    pub fn new(host: &str) -> Result<Self> {
        Self::with_scheme(Scheme::HTTPS, host)
    }

    /// Build a target with an explicit scheme. `new` is the production
    /// path; plain HTTP exists for integration tests against local mock
    /// upstreams.
    pub fn with_scheme(scheme: Scheme, host: &str) -> Result<Self> {
        let authority: Authority = host
            .parse()
            .map_err(|e| ProxyError::Config(format!("invalid server host {:?}: {}", host, e)))?;
        let host_value = HeaderValue::from_str(authority.as_str())
            .map_err(|e| ProxyError::Config(format!("invalid server host {:?}: {}", host, e)))?;

        Ok(Self {
            scheme,
            authority,
            host_value,
        })
    }

    /// The authority requests are redirected to.
    pub fn host(&self) -> &str {
        self.authority.as_str()
    }

    /// Redirect a request to this target.
    ///
    /// Rewrites the URI scheme and authority and replaces the Host header
    /// with the effective upstream Host value. No other field changes.
    pub fn direct(&self, request: Request<Body>) -> Request<Body> {
        let (mut parts, body) = request.into_parts();

        let original = parts.uri.clone();
        let mut uri_parts = parts.uri.into_parts();
        uri_parts.scheme = Some(self.scheme.clone());
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = Uri::from_parts(uri_parts).unwrap_or(original);

        parts.headers.insert(header::HOST, self.host_value.clone());

        Request::from_parts(parts, body)
    }
}
