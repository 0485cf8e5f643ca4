//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Init logging → parse flags → suppress interrupt → raise fd limit
//!         → validate config → bind listener → serve
//!
//! Shutdown:
//!     External supervisor signal only; the interactive interrupt is
//!     suppressed and steady-state per-request errors never terminate
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error (bad config, bind failure) is fatal
//! - The fd limit is raised before any socket is opened
//! - No graceful-shutdown machinery: the supervisor owns process lifetime

pub mod rlimit;
pub mod signals;
