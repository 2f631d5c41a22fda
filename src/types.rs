//! Shared primitive types: the wrapping millisecond counter and the
//! controller health classification.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic millisecond counter.  Wraps modulo 2^32 (~49.7 days).
pub type Millis = u32;

/// Milliseconds elapsed from `earlier` to `now`, correct across wraparound.
///
/// Every duration comparison in the crate goes through this helper.
#[inline]
pub const fn elapsed_ms(now: Millis, earlier: Millis) -> Millis {
    now.wrapping_sub(earlier)
}

/// Overall health attached to every interlocking decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Health {
    Ok = 0,
    /// A sensor feeding the decision is suspect (e.g. stuck track circuit).
    Degraded = 1,
    /// The control loop itself cannot be trusted.
    Fault = 2,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Degraded => write!(f, "DEGRADED"),
            Self::Fault => write!(f, "FAULT"),
        }
    }
}
