//! Time source abstraction.
//!
//! Message timestamps come from a [`Clock`] rather than from the system
//! directly, so the mediator can run against real time in production and a
//! hand-advanced clock in tests. Implementations must never go backwards
//! within one execution.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use crate::message::Timestamp;

/// Source of message timestamps.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    ///
    /// Subsequent calls must return values greater than or equal to previous
    /// calls.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock before the epoch reads as 0 rather than failing: timestamps
        // are informational, not ordering-critical.
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| {
            Timestamp::try_from(elapsed.as_millis()).unwrap_or(Timestamp::MAX)
        })
    }
}

/// Hand-advanced time source for deterministic tests.
///
/// Cloned handles share the same underlying instant, so a test can hold one
/// handle while the mediator owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start` milliseconds.
    pub fn new(start: Timestamp) -> Self {
        Self { now_ms: Arc::new(AtomicU64::new(start)) }
    }

    /// Advance the clock by `delta` milliseconds.
    pub fn advance(&self, delta: u64) {
        self.now_ms.fetch_add(delta, Ordering::Relaxed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now_ms.load(Ordering::Relaxed)
    }
}
