//! Hardware capability boundary.
//!
//! Pin access goes through the `embedded-hal` 1.0 digital traits so any
//! board support crate (or the [`SimGpio`](crate::adapters::sim_gpio::SimGpio)
//! bank used on the host) can drive the controller.  The clock is a separate
//! capability so that timing can be injected in tests.

pub use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::types::Millis;

/// Logical GPIO number.
pub type Pin = u16;

/// Electrical configuration requested for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PinMode {
    #[default]
    Input = 0,
    InputPullup = 1,
    OutputPushPull = 2,
}

/// Monotonic millisecond clock.
///
/// Must be non-decreasing modulo 2^32; consumers only ever take wrapping
/// differences of two readings.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}
