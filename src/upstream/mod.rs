//! Outbound connection management subsystem.
//!
//! # Data Flow
//! ```text
//! directed request
//!     → pool.rs (acquire slot; wait when the cap is saturated)
//!     → client.rs (reuse pooled/multiplexed connection or dial)
//!     → upstream response streamed back; slot released when the
//!       response body completes or is abandoned
//! ```
//!
//! # Design Decisions
//! - The cap bounds connections and streams together: one slot per
//!   in-flight request, whatever the negotiated protocol
//! - Dial timeout and keep-alive follow the outbound transport config
//! - Slot bookkeeping is the only shared mutable state in the crate

pub mod client;
pub mod pool;

pub use client::{UpstreamClient, UpstreamProtocol};
pub use pool::{UpstreamPool, UpstreamSlot};
