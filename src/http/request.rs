//! Inbound request validation and identification.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4) for correlation
//! - Reject protocol-inconsistent requests before any forwarding work
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Validation failures are client errors (400), not system faults

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::{ProxyError, Result};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID maker producing UUID v4 values.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Validate that an inbound request is well-formed enough to forward.
///
/// Hyper has already parsed the request line and headers; what remains is
/// message-framing consistency and methods the forwarding path cannot
/// carry.
pub fn validate(request: &Request<Body>) -> Result<()> {
    if request.method() == Method::CONNECT {
        return Err(ProxyError::MalformedRequest(
            "CONNECT is not supported".to_string(),
        ));
    }

    let headers = request.headers();

    // RFC 7230 §3.3.3: a message with both framing headers is malformed.
    if headers.contains_key(header::TRANSFER_ENCODING)
        && headers.contains_key(header::CONTENT_LENGTH)
    {
        return Err(ProxyError::MalformedRequest(
            "both Transfer-Encoding and Content-Length present".to_string(),
        ));
    }

    let mut lengths = headers.get_all(header::CONTENT_LENGTH).iter();
    if let Some(first) = lengths.next() {
        let parsed = first
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        if parsed.is_none() {
            return Err(ProxyError::MalformedRequest(
                "invalid Content-Length".to_string(),
            ));
        }
        if lengths.any(|other| other != first) {
            return Err(ProxyError::MalformedRequest(
                "conflicting Content-Length values".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/v1/ping")
    }

    #[test]
    fn plain_get_is_valid() {
        let req = request().body(Body::empty()).unwrap();
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn connect_is_rejected() {
        let req = Request::builder()
            .method(Method::CONNECT)
            .uri("example.com:443")
            .body(Body::empty())
            .unwrap();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn conflicting_framing_headers_are_rejected() {
        let req = request()
            .header(header::TRANSFER_ENCODING, "chunked")
            .header(header::CONTENT_LENGTH, "3")
            .body(Body::empty())
            .unwrap();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn garbage_content_length_is_rejected() {
        let req = request()
            .header(header::CONTENT_LENGTH, "three")
            .body(Body::empty())
            .unwrap();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn duplicate_equal_content_lengths_are_tolerated() {
        let req = request()
            .header(header::CONTENT_LENGTH, "3")
            .header(header::CONTENT_LENGTH, "3")
            .body(Body::empty())
            .unwrap();
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn duplicate_differing_content_lengths_are_rejected() {
        let req = request()
            .header(header::CONTENT_LENGTH, "3")
            .header(header::CONTENT_LENGTH, "4")
            .body(Body::empty())
            .unwrap();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn request_id_maker_produces_parsable_uuids() {
        let mut maker = UuidRequestId;
        let req = request().body(Body::empty()).unwrap();
        let id = maker.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap().to_string();
        assert!(Uuid::parse_str(&value).is_ok());
    }
}
