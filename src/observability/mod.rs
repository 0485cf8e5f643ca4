//! Observability subsystem.
//!
//! Structured logging only: the proxy is a local helper process whose
//! operational surface is its stderr stream.

pub mod logging;
