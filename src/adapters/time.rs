//! Clock adapters.
//!
//! - [`SystemClock`] wraps `std::time::Instant` and truncates to the wrapping
//!   32-bit millisecond counter the controller works in.
//! - [`SimClock`] is advanced by hand, for tests and the demo scenario.

use core::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::hal::Clock;
use crate::types::Millis;

/// Host monotonic clock, milliseconds since construction.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        // Truncation is the wraparound.
        self.start.elapsed().as_millis() as Millis
    }
}

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct SimClock {
    now: AtomicU32,
}

impl SimClock {
    pub fn new(start_ms: Millis) -> Self {
        Self {
            now: AtomicU32::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: Millis) {
        self.now.store(now_ms, Ordering::Relaxed);
    }

    /// Advance by `delta_ms`, wrapping like the hardware counter.
    pub fn advance(&self, delta_ms: Millis) -> Millis {
        let next = self.now_ms().wrapping_add(delta_ms);
        self.set(next);
        next
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::Relaxed)
    }
}
