//! Control-loop freshness and the combined per-cycle evaluation.

use crate::logic::interlocking::{Decision, Inputs, evaluate};
use crate::types::{Millis, elapsed_ms};

/// Whether the loop ran recently enough for its readings to be trusted.
///
/// `last_tick_ms == 0` means no previous tick has been recorded, which
/// counts as fresh.  The gap bound is inclusive.
pub fn controller_fresh(last_tick_ms: Millis, now: Millis, max_loop_gap_ms: Millis) -> bool {
    last_tick_ms == 0 || elapsed_ms(now, last_tick_ms) <= max_loop_gap_ms
}

/// Freshness check and interlocking evaluation in one call.
pub fn evaluate_controller_logic(
    last_tick_ms: Millis,
    now: Millis,
    max_loop_gap_ms: Millis,
    own_track_healthy: bool,
    own_occupied: bool,
    downstream_occupied: bool,
) -> Decision {
    evaluate(&Inputs {
        own_occupied,
        downstream_occupied,
        own_track_healthy,
        controller_fresh: controller_fresh(last_tick_ms, now, max_loop_gap_ms),
    })
}
