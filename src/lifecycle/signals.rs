//! OS signal handling.
//!
//! # Responsibilities
//! - Suppress the interactive interrupt signal (SIGINT / ctrl-c)
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The process never terminates on interrupt; an external supervisor
//!   owns the lifecycle and stops it with a non-interactive signal
//! - No other signals are intercepted

/// Install a no-op handler for the interrupt signal.
///
/// Spawns a task that consumes interrupt notifications for the process
/// lifetime so the user's terminal cannot kill the proxy out from under
/// the client it serves.
pub fn suppress_interrupt() {
    tokio::spawn(async {
        loop {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "failed to listen for interrupt signal");
                return;
            }
            tracing::debug!("interrupt ignored; supervisor controls shutdown");
        }
    });
}
