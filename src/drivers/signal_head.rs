//! Three-aspect colour-light signal head.
//!
//! Red, yellow and green lamps on three digital outputs.  At most one lamp
//! is ever lit: every lamp that should be dark is switched off first, and
//! the requested lamp is only lit once all of those writes succeeded.  If a
//! lamp cannot be switched off, the requested lamp stays dark.
//!
//! The driver owns no state beyond the current aspect.  Output write
//! failures are logged and latched in [`SignalHead::lamp_fault`].

use core::fmt;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::config::SignalHeadConfig;
use crate::error::HalError;
use crate::hal::{OutputPin, Pin, PinState};

/// Aspect shown by the signal.
///
/// Raw codes outside the three known values (a corrupted message, an
/// out-of-range register) decode as [`Aspect::Stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum Aspect {
    /// Red.
    #[default]
    Stop = 0,
    /// Yellow.
    Caution = 1,
    /// Green.
    Clear = 2,
}

impl From<u8> for Aspect {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Caution,
            2 => Self::Clear,
            _ => Self::Stop,
        }
    }
}

impl From<Aspect> for u8 {
    fn from(aspect: Aspect) -> Self {
        aspect as u8
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "STOP"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Clear => write!(f, "CLEAR"),
        }
    }
}

pub struct SignalHead<P> {
    cfg: SignalHeadConfig,
    red: P,
    yellow: P,
    green: P,
    aspect: Aspect,
    fault: Option<HalError>,
}

impl<P: OutputPin> SignalHead<P> {
    pub fn new(cfg: SignalHeadConfig, red: P, yellow: P, green: P) -> Self {
        Self {
            cfg,
            red,
            yellow,
            green,
            aspect: Aspect::Stop,
            fault: None,
        }
    }

    /// Drive the outputs to Stop.
    pub fn init(&mut self) {
        self.set_aspect(Aspect::Stop);
        info!(
            "signal head: R={} Y={} G={} active_{}",
            self.cfg.red_pin,
            self.cfg.yellow_pin,
            self.cfg.green_pin,
            if self.cfg.active_high { "high" } else { "low" }
        );
    }

    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
        let c = self.cfg;

        let mut lamps = [
            (&mut self.red, c.red_pin, aspect == Aspect::Stop),
            (&mut self.yellow, c.yellow_pin, aspect == Aspect::Caution),
            (&mut self.green, c.green_pin, aspect == Aspect::Clear),
        ];

        let mut fault = None;
        for (line, pin, _) in lamps.iter_mut().filter(|lamp| !lamp.2) {
            if let Err(e) = drive(&mut **line, *pin, false, c.active_high) {
                fault = Some(e);
            }
        }
        // A lamp that may still be lit blocks the requested one.
        if fault.is_none() {
            if let Some((line, pin, _)) = lamps.iter_mut().find(|lamp| lamp.2) {
                if let Err(e) = drive(&mut **line, *pin, true, c.active_high) {
                    fault = Some(e);
                }
            }
        }

        match (fault, self.fault) {
            (Some(e), None) => error!("signal head: {e}"),
            (None, Some(_)) => info!("signal head: outputs recovered"),
            _ => {}
        }
        self.fault = fault;
    }

    /// Apply a raw aspect code from an untyped boundary.  Unknown codes
    /// show Stop.
    pub fn set_aspect_code(&mut self, code: u8) {
        self.set_aspect(Aspect::from(code));
    }

    pub fn current_aspect(&self) -> Aspect {
        self.aspect
    }

    /// Most recent output write failure, cleared by the next fully
    /// successful [`set_aspect`](Self::set_aspect).
    pub fn lamp_fault(&self) -> Option<HalError> {
        self.fault
    }
}

fn drive<P: OutputPin>(line: &mut P, pin: Pin, on: bool, active_high: bool) -> Result<(), HalError> {
    line.set_state(PinState::from(on == active_high))
        .map_err(|_| HalError::OutputWriteFailed { pin })
}
