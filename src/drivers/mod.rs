//! Output drivers.

pub mod signal_head;

pub use signal_head::{Aspect, SignalHead};
