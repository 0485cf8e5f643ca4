//! Response handling and transformation.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers on both forwarding legs
//! - Map per-request errors to well-formed client responses
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire bodies
//! - Hop-by-hop headers stripped per RFC 7230, including headers named in
//!   the Connection header
//! - Transport-level failures map to 502 with a short diagnostic body

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Response, StatusCode};

use crate::error::ProxyError;

/// RFC 7230 §6.1 hop-by-hop headers, meaningful for one connection leg only.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Whether a header must not be forwarded across a connection boundary.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || name.as_str() == "proxy-connection"
}

/// Remove hop-by-hop headers, including any header the Connection header
/// names.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let connection_named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| token.trim().parse::<HeaderName>().ok())
        .collect();

    for name in connection_named {
        headers.remove(&name);
    }
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("proxy-connection");
}

/// 400 response for a request that failed validation.
pub fn bad_request(err: &ProxyError) -> Response<Body> {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(err.to_string()))
        .unwrap()
}

/// 502 response for an upstream dial or transport failure.
pub fn bad_gateway(err: &ProxyError) -> Response<Body> {
    Response::builder()
        .status(StatusCode::BAD_GATEWAY)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(err.to_string()))
        .unwrap()
}
