//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (loopback)
//!     → server.rs (Axum setup, forwarding engine)
//!     → request.rs (request ID, protocol validation)
//!     → [director rewrites to the fixed upstream]
//!     → [pool slot borrowed; upstream client sends]
//!     → response.rs (hop-by-hop stripping, error mapping)
//!     → streamed back to the client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
