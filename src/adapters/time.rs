//! Monotonic clock adapter.
//!
//! The signal player works in absolute milliseconds on a caller-supplied
//! clock.  This adapter anchors that clock at construction using
//! `std::time::Instant`.

use std::time::{Duration, Instant};

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Time left until the absolute deadline `due_ms` (zero if passed).
    pub fn until(&self, due_ms: u64) -> Duration {
        Duration::from_millis(due_ms.saturating_sub(self.now_ms()))
    }
}
