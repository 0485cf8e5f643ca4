//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → CLI flags overlay the listen port and upstream host
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the listener is bound; no reload path
//! - All fields have defaults so the flag surface stays minimal
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
