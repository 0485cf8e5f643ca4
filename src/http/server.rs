//! HTTP server setup and the forwarding engine.
//!
//! # Responsibilities
//! - Create the Axum router and wire middleware (tracing, request ID)
//! - Validate inbound requests before any forwarding work
//! - Apply the director, borrow a pool slot, send upstream
//! - Stream the upstream response back without buffering
//! - Map transport failures to well-formed 502 responses
//!
//! # Design Decisions
//! - Inbound connections are not bounded; only outbound traffic is capped
//! - No overall request timeout: a slow-but-connected upstream may hold a
//!   worker until the client gives up
//! - The pool slot travels with the response body stream, so client
//!   disconnects release it as soon as the body is dropped

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response};
use axum::routing::any;
use axum::Router;
use futures_util::StreamExt;
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::Result;
use crate::http::request::{self, UuidRequestId};
use crate::http::response;
use crate::routing::UpstreamTarget;
use crate::upstream::{UpstreamClient, UpstreamPool, UpstreamProtocol};

/// Application state injected into the forwarding handler.
#[derive(Clone)]
pub struct AppState {
    pub target: Arc<UpstreamTarget>,
    pub pool: Arc<UpstreamPool>,
    pub client: Arc<UpstreamClient>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    target: Arc<UpstreamTarget>,
    max_in_flight: usize,
}

impl HttpServer {
    /// Create a server forwarding to the configured upstream over HTTPS.
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let target = UpstreamTarget::new(&config.upstream.server_host)?;
        Ok(Self::with_target(config, target))
    }

    /// Create a server forwarding to an explicit target. Integration tests
    /// use this to point at plain-HTTP mock upstreams.
    pub fn with_target(config: ProxyConfig, target: UpstreamTarget) -> Self {
        let target = Arc::new(target);
        let pool = Arc::new(UpstreamPool::new(config.upstream.max_in_flight));
        let client = Arc::new(UpstreamClient::new(&config.timeouts));

        let state = AppState {
            target: target.clone(),
            pool,
            client,
        };

        Self {
            router: Self::build_router(state),
            target,
            max_in_flight: config.upstream.max_in_flight,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// There is no signal-driven shutdown here: the interrupt signal is
    /// suppressed at startup and an external supervisor owns the process.
    pub async fn run(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.target.host(),
            max_in_flight = self.max_in_flight,
            "forwarding proxy ready"
        );

        axum::serve(listener, self.router).await
    }
}

/// The forwarding engine: one invocation per inbound request.
///
/// Lifecycle: received → directed → forwarding → (streaming-response |
/// failed). Both terminal states release the borrowed outbound slot.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    if let Err(err) = request::validate(&request) {
        tracing::debug!(error = %err, "rejecting inbound request");
        return response::bad_request(&err);
    }

    let mut request = state.target.direct(request);
    response::strip_hop_by_hop(request.headers_mut());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Backpressure point: waits while the outbound cap is saturated.
    let slot = state.pool.acquire().await;

    match state.client.send(request).await {
        Ok(upstream_response) => {
            let protocol = UpstreamProtocol::from_version(upstream_response.version());
            tracing::debug!(
                method = %method,
                path = %path,
                status = upstream_response.status().as_u16(),
                protocol = %protocol,
                in_flight = state.pool.in_flight(),
                "forwarded"
            );

            let (mut parts, body) = upstream_response.into_parts();
            response::strip_hop_by_hop(&mut parts.headers);

            // The slot rides with the body stream: dropping the stream
            // (completion or client disconnect) releases it.
            let body = Body::from_stream(body.into_data_stream().map(move |frame| {
                let _slot = &slot;
                frame
            }));

            Response::from_parts(parts, body)
        }
        Err(err) => {
            tracing::warn!(
                method = %method,
                path = %path,
                error = %err,
                "upstream request failed"
            );
            response::bad_gateway(&err)
        }
    }
}
