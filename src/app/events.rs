//! Outbound application events.
//!
//! The [`BlockController`](super::service::BlockController) emits these
//! through the [`EventSink`](super::ports::EventSink) port on edges only,
//! never once per tick.

use crate::logic::interlocking::Decision;
use crate::types::Millis;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller came up and drove its conservative startup decision.
    Started { at_ms: Millis, decision: Decision },

    /// The decision differs from the previous cycle's (aspect, reason or
    /// health).
    DecisionChanged {
        at_ms: Millis,
        from: Decision,
        to: Decision,
    },
}
