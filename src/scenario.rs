//! Scripted demo run on simulated hardware.
//!
//! A [`Scenario`] owns a [`SimGpio`] bank, a clock and a fully wired
//! controller.  Each [`step`](Scenario::step) first applies every timeline
//! event that has come due (relative to the start time), then runs one
//! control cycle.  The host binary drives it at the configured tick rate.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::adapters::hardware::{HardwareController, build_sim_controller};
use crate::adapters::sim_gpio::{SimGpio, SimInputPin, SimOutputPin};
use crate::app::ports::EventSink;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Result};
use crate::hal::{Clock, Pin};
use crate::logic::interlocking::Decision;
use crate::types::{Millis, elapsed_ms};

/// Longest timeline a scenario accepts.
pub const MAX_EVENTS: usize = 8;

/// Set a track input line to a raw level at a point in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent {
    /// Offset from scenario start.
    pub at_ms: Millis,
    pub pin: Pin,
    pub high: bool,
}

/// Events ordered by `at_ms`.
pub type Timeline = heapless::Vec<TrackEvent, MAX_EVENTS>;

/// Default configuration with a short stuck-fault window, so the demo
/// reaches the fault within a few seconds.
pub fn demo_config() -> SystemConfig {
    let mut cfg = SystemConfig::default();
    cfg.own_track.stuck_fault_ms = 800;
    cfg.downstream_track.stuck_fault_ms = 800;
    cfg
}

/// A train runs through the next block, then through ours; finally our
/// circuit drops and never comes back.
pub fn demo_timeline(cfg: &SystemConfig) -> Timeline {
    let own = cfg.own_track.pin;
    let downstream = cfg.downstream_track.pin;
    [
        (600, downstream, false),
        (1300, own, false),
        (1900, own, true),
        (2500, downstream, true),
        (3000, own, false),
    ]
    .into_iter()
    .map(|(at_ms, pin, high)| TrackEvent { at_ms, pin, high })
    .collect()
}

/// Decode a timeline from JSON.  Events are sorted by time.
pub fn timeline_from_json(text: &str) -> core::result::Result<Timeline, ConfigError> {
    let mut timeline: Timeline = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
    timeline.sort_unstable_by_key(|e| e.at_ms);
    Ok(timeline)
}

pub struct Scenario<C> {
    gpio: SimGpio,
    clock: C,
    start_ms: Millis,
    controller: HardwareController<SimInputPin, SimOutputPin>,
    timeline: Timeline,
    next: usize,
}

impl<C: Clock> Scenario<C> {
    /// Wire a controller onto a fresh simulated bank.  Both track circuits
    /// start energized (clear).
    pub fn new(cfg: &SystemConfig, timeline: Timeline, clock: C) -> Result<Self> {
        cfg.validate()?;
        let track_pins = [cfg.own_track.pin, cfg.downstream_track.pin];
        if timeline.iter().any(|e| !track_pins.contains(&e.pin)) {
            return Err(ConfigError::ValidationFailed("timeline event on a non-track pin").into());
        }

        let gpio = SimGpio::new();
        for (pin, polarity) in [
            (cfg.own_track.pin, cfg.own_track.polarity),
            (cfg.downstream_track.pin, cfg.downstream_track.polarity),
        ] {
            gpio.set_input_level(pin, polarity.is_clear(true));
        }
        let controller = build_sim_controller(cfg, &gpio);
        let start_ms = clock.now_ms();

        Ok(Self {
            gpio,
            clock,
            start_ms,
            controller,
            timeline,
            next: 0,
        })
    }

    /// Initialize the controller at the clock's current time, which becomes
    /// the scenario origin.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.start_ms = self.clock.now_ms();
        self.next = 0;
        self.controller.initialize(self.start_ms, sink);
        info!("scenario started with {} events", self.timeline.len());
    }

    /// Apply due events, then run one control cycle.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Decision {
        let offset = self.elapsed_ms();
        while let Some(event) = self.timeline.get(self.next) {
            if event.at_ms > offset {
                break;
            }
            debug!(
                "t={}ms: pin {} -> {}",
                event.at_ms,
                event.pin,
                if event.high { "HIGH" } else { "LOW" }
            );
            self.gpio.set_input_level(event.pin, event.high);
            self.next += 1;
        }
        self.controller.tick_with_clock(&self.clock, sink)
    }

    /// Time since [`start`](Self::start).
    pub fn elapsed_ms(&self) -> Millis {
        elapsed_ms(self.clock.now_ms(), self.start_ms)
    }

    /// Every event has been applied.
    pub fn finished(&self) -> bool {
        self.next >= self.timeline.len()
    }

    pub fn gpio(&self) -> &SimGpio {
        &self.gpio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn controller(&self) -> &HardwareController<SimInputPin, SimOutputPin> {
        &self.controller
    }
}
