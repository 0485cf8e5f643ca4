//! Outbound slot pool.
//!
//! # Responsibilities
//! - Bound the number of simultaneously in-use outbound connections/streams
//! - Make waiting (not failing) the behavior when the cap is saturated
//! - Release slots via RAII so cancellation and panics cannot leak them
//!
//! # Design Decisions
//! - A semaphore owns the cap; an atomic gauge exists for observability
//! - The slot is held until the response body finishes streaming, so an
//!   HTTP/2 stream counts against the cap for its full lifetime
//! - No queue depth limit and no starvation prevention beyond turnover

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds in-use outbound connections/streams to the upstream host.
///
/// Shared mutable state across all workers; all mutation goes through
/// `acquire` and the returned guard's `Drop`.
#[derive(Debug)]
pub struct UpstreamPool {
    slots: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: usize,
}

impl UpstreamPool {
    /// Create a pool with the given concurrency cap.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max_in_flight)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight,
        }
    }

    /// Acquire a slot, waiting if the cap is saturated.
    ///
    /// This is the backpressure point: under load beyond the cap, callers
    /// observe latency here, never failure.
    pub async fn acquire(&self) -> UpstreamSlot {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .expect("Semaphore closed unexpectedly");

        let in_flight = self.in_flight.clone();
        in_flight.fetch_add(1, Ordering::Relaxed);

        UpstreamSlot {
            _permit: permit,
            in_flight,
        }
    }

    /// Number of slots currently in use.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Configured concurrency cap.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }
}

/// A slot representing one in-use outbound connection or stream.
///
/// Dropping the slot releases it back to the pool. The forwarding path ties
/// the slot's lifetime to the response body stream, so an abandoned
/// response (client disconnect) releases the slot as soon as the stream is
/// dropped.
#[derive(Debug)]
pub struct UpstreamSlot {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for UpstreamSlot {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
