//! Track circuit occupancy monitor.
//!
//! A track circuit is energized while its block is empty; a train's wheels
//! short it out.  The monitor turns the raw line into two trustworthy
//! signals:
//!
//! - **occupied**: the polarity-corrected raw level, debounced so that a
//!   transition is only reported once it has held for `debounce_ms`.
//! - **healthy**: false once the debounced state has read occupied for
//!   `stuck_fault_ms` without a break (a circuit that never clears is far
//!   more often broken than occupied).  Restored the instant the debounced
//!   state reads clear.
//!
//! Recovery is trusted immediately and degradation needs sustained evidence.
//! Chatter is the debounce layer's job, not the fault layer's.
//!
//! ## Timing
//!
//! All durations are wrapping differences of the 32-bit millisecond counter,
//! so the monitor keeps working across counter rollover.  Zero windows mean
//! "accept on the same sample".

use log::{error, info, warn};

use crate::config::TrackCircuitConfig;
use crate::error::HalError;
use crate::hal::InputPin;
use crate::types::{Millis, elapsed_ms};

pub struct OccupancyMonitor<P> {
    cfg: TrackCircuitConfig,
    line: P,
    /// Last sampled level, polarity-corrected.
    raw_clear: bool,
    /// Debounced level; this is what gets reported.
    stable_clear: bool,
    last_raw_change_ms: Millis,
    healthy: bool,
    /// Start of the current unbroken occupied stretch; 0 is a valid start time.
    stuck_since_ms: Option<Millis>,
    read_fault: Option<HalError>,
}

impl<P: InputPin> OccupancyMonitor<P> {
    /// Build a monitor over `line`.  Reports occupied until [`initialize`]
    /// has taken the first sample.
    ///
    /// [`initialize`]: Self::initialize
    pub fn new(cfg: TrackCircuitConfig, line: P) -> Self {
        Self {
            cfg,
            line,
            raw_clear: false,
            stable_clear: false,
            last_raw_change_ms: 0,
            healthy: true,
            stuck_since_ms: None,
            read_fault: None,
        }
    }

    /// Seed raw and stable state from one synchronous sample and reset both
    /// timers.  Always healthy afterwards.
    pub fn initialize(&mut self) {
        self.raw_clear = self.read_raw_clear();
        self.stable_clear = self.raw_clear;
        self.last_raw_change_ms = 0;
        self.healthy = true;
        self.stuck_since_ms = None;
        info!(
            "track pin {}: initialized {}",
            self.cfg.pin,
            if self.stable_clear { "CLEAR" } else { "OCCUPIED" }
        );
    }

    /// Take one sample at `now`.  Call once per control cycle.
    pub fn sample(&mut self, now: Millis) {
        let raw_clear = self.read_raw_clear();
        if raw_clear != self.raw_clear {
            self.raw_clear = raw_clear;
            self.last_raw_change_ms = now;
        }

        if elapsed_ms(now, self.last_raw_change_ms) >= self.cfg.debounce_ms
            && self.stable_clear != self.raw_clear
        {
            self.stable_clear = self.raw_clear;
            info!(
                "track pin {}: {}",
                self.cfg.pin,
                if self.stable_clear { "CLEAR" } else { "OCCUPIED" }
            );
        }

        if self.stable_clear {
            self.stuck_since_ms = None;
            if !self.healthy {
                info!("TRACK FAULT CLEARED: pin {}", self.cfg.pin);
            }
            self.healthy = true;
        } else {
            let since = *self.stuck_since_ms.get_or_insert(now);
            if self.healthy && elapsed_ms(now, since) >= self.cfg.stuck_fault_ms {
                self.healthy = false;
                error!(
                    "TRACK FAULT SET: pin {} occupied for {} ms",
                    self.cfg.pin,
                    elapsed_ms(now, since)
                );
            }
        }
    }

    /// Debounced occupancy.
    pub fn occupied(&self) -> bool {
        !self.stable_clear
    }

    pub fn healthy(&self) -> bool {
        self.healthy
    }

    pub fn config(&self) -> &TrackCircuitConfig {
        &self.cfg
    }

    /// Set while the input line cannot be read.
    pub fn read_fault(&self) -> Option<HalError> {
        self.read_fault
    }

    /// Read the line and apply polarity.  A failed read counts as "not
    /// clear", the same as a de-energized circuit.
    fn read_raw_clear(&mut self) -> bool {
        match self.line.is_high() {
            Ok(high) => {
                if self.read_fault.take().is_some() {
                    info!("track pin {}: input readable again", self.cfg.pin);
                }
                self.cfg.polarity.is_clear(high)
            }
            Err(e) => {
                if self.read_fault.is_none() {
                    self.read_fault = Some(HalError::InputReadFailed { pin: self.cfg.pin });
                    warn!(
                        "track pin {}: input read failed ({:?}), treating as occupied",
                        self.cfg.pin, e
                    );
                }
                false
            }
        }
    }
}
