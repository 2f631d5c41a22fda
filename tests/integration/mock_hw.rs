//! Recording adapters for integration tests.
//!
//! The lamp and sink record every call so tests can assert on the full
//! command history; [`Rig`] wires a controller to a simulated GPIO bank.

use blocksignal::adapters::sim_gpio::{SimGpio, SimInputPin};
use blocksignal::app::events::AppEvent;
use blocksignal::app::ports::{EventSink, LampPort};
use blocksignal::app::service::BlockController;
use blocksignal::config::{SystemConfig, TrackCircuitConfig};
use blocksignal::drivers::signal_head::Aspect;
use blocksignal::logic::interlocking::Decision;
use blocksignal::sensors::track_circuit::OccupancyMonitor;
use blocksignal::types::Millis;

// ── RecordingLamp ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingLamp {
    pub shown: Vec<Aspect>,
}

impl LampPort for RecordingLamp {
    fn set_aspect(&mut self, aspect: Aspect) {
        self.shown.push(aspect);
    }

    fn current_aspect(&self) -> Aspect {
        self.shown.last().copied().unwrap_or_default()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    /// `(at_ms, to)` for every decision change, in order.
    pub fn changes(&self) -> Vec<(Millis, Decision)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::DecisionChanged { at_ms, to, .. } => Some((*at_ms, *to)),
                AppEvent::Started { .. } => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type RigController = BlockController<SimInputPin, SimInputPin, RecordingLamp>;

/// Controller over a simulated bank with both circuits starting clear.
pub struct Rig {
    pub gpio: SimGpio,
    pub cfg: SystemConfig,
    pub ctrl: RigController,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(own: TrackCircuitConfig, downstream: TrackCircuitConfig) -> Self {
        let cfg = SystemConfig {
            own_track: own,
            downstream_track: downstream,
            ..SystemConfig::default()
        };
        let gpio = SimGpio::new();
        gpio.set_input_level(own.pin, own.polarity.is_clear(true));
        gpio.set_input_level(downstream.pin, downstream.polarity.is_clear(true));
        let ctrl = BlockController::new(
            cfg.controller,
            OccupancyMonitor::new(own, gpio.input(own.pin)),
            OccupancyMonitor::new(downstream, gpio.input(downstream.pin)),
            RecordingLamp::default(),
        );
        Self {
            gpio,
            cfg,
            ctrl,
            sink: RecordingSink::default(),
        }
    }

    pub fn with_defaults() -> Self {
        let cfg = SystemConfig::default();
        Self::new(cfg.own_track, cfg.downstream_track)
    }

    pub fn start(&mut self, now: Millis) {
        self.ctrl.initialize(now, &mut self.sink);
    }

    pub fn tick(&mut self, now: Millis) -> Decision {
        self.ctrl.tick(now, &mut self.sink)
    }

    /// Tick every `step` ms over `(from, to]`.
    pub fn run(&mut self, from: Millis, to: Millis, step: Millis) -> Decision {
        let mut t = from;
        let mut last = self.ctrl.last_decision();
        while t < to {
            t += step;
            last = self.tick(t);
        }
        last
    }

    /// Drive the own track line so it reads clear (or occupied).
    pub fn set_own_clear(&self, clear: bool) {
        let c = self.cfg.own_track;
        self.gpio.set_input_level(c.pin, c.polarity.is_clear(true) == clear);
    }

    pub fn set_downstream_clear(&self, clear: bool) {
        let c = self.cfg.downstream_track;
        self.gpio.set_input_level(c.pin, c.polarity.is_clear(true) == clear);
    }
}
