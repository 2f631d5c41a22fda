//! Pure decision logic: no hardware, no clock, no state.

pub mod freshness;
pub mod interlocking;

pub use freshness::{controller_fresh, evaluate_controller_logic};
pub use interlocking::{Decision, Inputs, StopReason, evaluate};
