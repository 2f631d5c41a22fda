//! Simulated GPIO bank for host builds and tests.
//!
//! A fixed bank of 256 lines.  Each line stores its level, the mode it was
//! configured with, and optional injected read/write faults.  Pin handles
//! implement the `embedded-hal` digital traits and share the bank, so a test
//! can hold the [`SimGpio`] and flip input levels while the controller owns
//! the pin handles.
//!
//! Lines at or above [`SimGpio::MAX_PINS`] read Low and swallow writes.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::hal::{Pin, PinMode};

const MAX_PINS: usize = 256;

struct SimBank {
    levels: [AtomicBool; MAX_PINS],
    modes: [AtomicU8; MAX_PINS],
    read_faults: [AtomicBool; MAX_PINS],
    write_faults: [AtomicBool; MAX_PINS],
}

impl SimBank {
    fn new() -> Self {
        Self {
            levels: [const { AtomicBool::new(false) }; MAX_PINS],
            modes: [const { AtomicU8::new(PinMode::Input as u8) }; MAX_PINS],
            read_faults: [const { AtomicBool::new(false) }; MAX_PINS],
            write_faults: [const { AtomicBool::new(false) }; MAX_PINS],
        }
    }

    fn slot(pin: Pin) -> Option<usize> {
        let idx = pin as usize;
        (idx < MAX_PINS).then_some(idx)
    }
}

/// Shared handle to the simulated bank.  Cloning is cheap.
#[derive(Clone)]
pub struct SimGpio {
    bank: Arc<SimBank>,
}

impl Default for SimGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGpio {
    pub const MAX_PINS: usize = MAX_PINS;

    pub fn new() -> Self {
        Self {
            bank: Arc::new(SimBank::new()),
        }
    }

    pub fn configure(&self, pin: Pin, mode: PinMode) {
        if let Some(i) = SimBank::slot(pin) {
            self.bank.modes[i].store(mode as u8, Ordering::Relaxed);
        }
    }

    pub fn mode(&self, pin: Pin) -> PinMode {
        match SimBank::slot(pin).map(|i| self.bank.modes[i].load(Ordering::Relaxed)) {
            Some(1) => PinMode::InputPullup,
            Some(2) => PinMode::OutputPushPull,
            _ => PinMode::Input,
        }
    }

    /// Hand out an input line, configured with the pull-up enabled.
    pub fn input(&self, pin: Pin) -> SimInputPin {
        self.configure(pin, PinMode::InputPullup);
        SimInputPin {
            bank: Arc::clone(&self.bank),
            pin,
        }
    }

    /// Hand out a push-pull output line.
    pub fn output(&self, pin: Pin) -> SimOutputPin {
        self.configure(pin, PinMode::OutputPushPull);
        SimOutputPin {
            bank: Arc::clone(&self.bank),
            pin,
        }
    }

    /// Drive the level that subsequent reads of `pin` observe.
    pub fn set_input_level(&self, pin: Pin, high: bool) {
        if let Some(i) = SimBank::slot(pin) {
            self.bank.levels[i].store(high, Ordering::Relaxed);
        }
    }

    /// Current level of a line (last write for outputs).
    pub fn level(&self, pin: Pin) -> bool {
        SimBank::slot(pin).is_some_and(|i| self.bank.levels[i].load(Ordering::Relaxed))
    }

    /// Make every read of `pin` fail until cleared.
    pub fn inject_read_fault(&self, pin: Pin, faulted: bool) {
        if let Some(i) = SimBank::slot(pin) {
            self.bank.read_faults[i].store(faulted, Ordering::Relaxed);
        }
    }

    /// Make every write to `pin` fail until cleared.
    pub fn inject_write_fault(&self, pin: Pin, faulted: bool) {
        if let Some(i) = SimBank::slot(pin) {
            self.bank.write_faults[i].store(faulted, Ordering::Relaxed);
        }
    }
}

// ── Pin handles ───────────────────────────────────────────────

/// Error returned by a simulated line with an injected fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinError {
    pub pin: Pin,
}

impl digital::Error for SimPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct SimInputPin {
    bank: Arc<SimBank>,
    pin: Pin,
}

impl SimInputPin {
    pub fn pin(&self) -> Pin {
        self.pin
    }
}

impl ErrorType for SimInputPin {
    type Error = SimPinError;
}

impl InputPin for SimInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        match SimBank::slot(self.pin) {
            Some(i) if self.bank.read_faults[i].load(Ordering::Relaxed) => {
                Err(SimPinError { pin: self.pin })
            }
            Some(i) => Ok(self.bank.levels[i].load(Ordering::Relaxed)),
            None => Ok(false),
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct SimOutputPin {
    bank: Arc<SimBank>,
    pin: Pin,
}

impl SimOutputPin {
    pub fn pin(&self) -> Pin {
        self.pin
    }

    fn write(&mut self, high: bool) -> Result<(), SimPinError> {
        match SimBank::slot(self.pin) {
            Some(i) if self.bank.write_faults[i].load(Ordering::Relaxed) => {
                Err(SimPinError { pin: self.pin })
            }
            Some(i) => {
                self.bank.levels[i].store(high, Ordering::Relaxed);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl ErrorType for SimOutputPin {
    type Error = SimPinError;
}

impl OutputPin for SimOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
