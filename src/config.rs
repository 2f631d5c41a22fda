//! System configuration parameters
//!
//! Pin assignments and timing constants for one block controller.
//! Supplied at construction time; the host binary can load them from JSON,
//! and the compact postcard form is what a board would keep in flash.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hal::Pin;
use crate::pins;
use crate::types::Millis;

/// Which raw level means "track circuit energized" (= clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Line pulled HIGH by the energized relay (the usual wiring).
    #[default]
    HighIsClear,
    LowIsClear,
}

impl Polarity {
    /// Map a raw line level to "clear".
    pub const fn is_clear(self, high: bool) -> bool {
        match self {
            Self::HighIsClear => high,
            Self::LowIsClear => !high,
        }
    }
}

/// One track circuit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCircuitConfig {
    pub pin: Pin,
    pub polarity: Polarity,
    /// How long a raw transition must persist before it is reported.
    pub debounce_ms: Millis,
    /// How long the block may read occupied before the circuit is declared
    /// faulty.
    pub stuck_fault_ms: Millis,
}

impl TrackCircuitConfig {
    pub const fn with_pin(pin: Pin) -> Self {
        Self {
            pin,
            polarity: Polarity::HighIsClear,
            debounce_ms: 50,
            stuck_fault_ms: 3000,
        }
    }
}

/// Three-aspect signal head outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalHeadConfig {
    pub red_pin: Pin,
    pub yellow_pin: Pin,
    pub green_pin: Pin,
    /// Lamp lit when the output is HIGH.
    pub active_high: bool,
}

impl Default for SignalHeadConfig {
    fn default() -> Self {
        Self {
            red_pin: pins::RED_LAMP_PIN,
            yellow_pin: pins::YELLOW_LAMP_PIN,
            green_pin: pins::GREEN_LAMP_PIN,
            active_high: true,
        }
    }
}

/// Control loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Longest gap between two ticks before the loop counts as stale.
    pub max_loop_gap_ms: Millis,
    /// Superloop cadence the gap is calibrated against.
    pub tick_interval_ms: Millis,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_loop_gap_ms: 200,
            tick_interval_ms: 50, // 20 Hz
        }
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub own_track: TrackCircuitConfig,
    pub downstream_track: TrackCircuitConfig,
    pub signal: SignalHeadConfig,
    pub controller: ControllerConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            own_track: TrackCircuitConfig::with_pin(pins::OWN_TRACK_PIN),
            downstream_track: TrackCircuitConfig::with_pin(pins::DOWNSTREAM_TRACK_PIN),
            signal: SignalHeadConfig::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Reject structurally wrong configurations.
    ///
    /// Zero debounce or stuck-fault windows are accepted: they mean "accept
    /// on the same sample" and the monitors handle them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let used = [
            self.own_track.pin,
            self.downstream_track.pin,
            self.signal.red_pin,
            self.signal.yellow_pin,
            self.signal.green_pin,
        ];
        for (i, a) in used.iter().enumerate() {
            if used[i + 1..].contains(a) {
                return Err(ConfigError::ValidationFailed("pin assigned twice"));
            }
        }

        if self.controller.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.controller.max_loop_gap_ms < self.controller.tick_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "max_loop_gap_ms shorter than tick_interval_ms",
            ));
        }
        Ok(())
    }

    /// Decode and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Decode and validate the compact flash encoding.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Corrupted)
    }
}
