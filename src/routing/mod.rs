//! Request redirection subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (any scheme/host)
//!     → director.rs (rewrite scheme, authority, Host header)
//!     → request addressed to the fixed upstream target
//! ```
//!
//! There is no route matching: every request goes to the single configured
//! upstream.

pub mod director;

pub use director::UpstreamTarget;
