//! Default pin assignments for the single-block controller board.
//!
//! Single source of truth for the defaults in [`SystemConfig`](crate::config::SystemConfig).
//! Deployed boards override these through the configuration file.

use crate::hal::Pin;

// ---------------------------------------------------------------------------
// Track circuit inputs (pulled up; HIGH = energized = clear)
// ---------------------------------------------------------------------------

/// Track circuit of the block this signal protects.
pub const OWN_TRACK_PIN: Pin = 2;
/// Track circuit of the next block beyond the signal.
pub const DOWNSTREAM_TRACK_PIN: Pin = 3;

// ---------------------------------------------------------------------------
// Signal head lamp outputs (push-pull, active HIGH)
// ---------------------------------------------------------------------------

pub const RED_LAMP_PIN: Pin = 10;
pub const YELLOW_LAMP_PIN: Pin = 11;
pub const GREEN_LAMP_PIN: Pin = 12;
