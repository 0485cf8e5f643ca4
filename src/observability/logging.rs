//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Write to stderr so the local client keeps stdout to itself
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - RUST_LOG overrides the built-in default filter

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging subsystem. Call once, before anything logs.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muxgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
