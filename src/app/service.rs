//! Block controller — the per-cycle orchestration.
//!
//! [`BlockController`] owns the two occupancy monitors and the lamp.  Each
//! tick it works out whether the loop itself is still live, samples both
//! track circuits, evaluates the interlocking and drives the lamp.
//!
//! ```text
//!  own track ──▶ OccupancyMonitor ─┐
//!                                  ├─▶ Inputs ─▶ evaluate ─▶ LampPort
//!  next track ─▶ OccupancyMonitor ─┘      ▲                  EventSink
//!                               freshness ┘
//! ```
//!
//! There is no error path: a stale loop, a faulty circuit and an occupied
//! block are all ordinary decisions.

use log::info;

use crate::config::ControllerConfig;
use crate::hal::{Clock, InputPin};
use crate::logic::freshness::controller_fresh;
use crate::logic::interlocking::{Decision, Inputs, evaluate};
use crate::sensors::track_circuit::OccupancyMonitor;
use crate::types::Millis;

use super::events::AppEvent;
use super::ports::{EventSink, LampPort};

// ───────────────────────────────────────────────────────────────
// BlockController
// ───────────────────────────────────────────────────────────────

pub struct BlockController<O, D, L> {
    cfg: ControllerConfig,
    own: OccupancyMonitor<O>,
    downstream: OccupancyMonitor<D>,
    lamp: L,
    /// Time of the previous tick; 0 = none recorded yet.
    last_tick_ms: Millis,
    last: Decision,
    tick_count: u64,
}

impl<O, D, L> BlockController<O, D, L>
where
    O: InputPin,
    D: InputPin,
    L: LampPort,
{
    /// Does **not** touch any hardware; call [`initialize`](Self::initialize)
    /// next.
    pub fn new(
        cfg: ControllerConfig,
        own: OccupancyMonitor<O>,
        downstream: OccupancyMonitor<D>,
        lamp: L,
    ) -> Self {
        Self {
            cfg,
            own,
            downstream,
            lamp,
            last_tick_ms: 0,
            last: Decision::default(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Seed both monitors and show the most restrictive aspect before any
    /// real reading has been evaluated.
    pub fn initialize(&mut self, now: Millis, sink: &mut impl EventSink) {
        self.own.initialize();
        self.downstream.initialize();

        self.last_tick_ms = now;
        self.last = evaluate(&Inputs::CONSERVATIVE);
        self.lamp.set_aspect(self.last.aspect);

        sink.emit(&AppEvent::Started {
            at_ms: now,
            decision: self.last,
        });
        info!("BlockController started: {}", self.last);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle at `now`.
    pub fn tick(&mut self, now: Millis, sink: &mut impl EventSink) -> Decision {
        self.tick_count += 1;

        // Against the previous tick, before it is overwritten below.
        let fresh = controller_fresh(self.last_tick_ms, now, self.cfg.max_loop_gap_ms);

        self.own.sample(now);
        self.downstream.sample(now);

        let inputs = Inputs {
            own_occupied: self.own.occupied(),
            downstream_occupied: self.downstream.occupied(),
            own_track_healthy: self.own.healthy(),
            controller_fresh: fresh,
        };

        let prev = self.last;
        self.last = evaluate(&inputs);
        self.lamp.set_aspect(self.last.aspect);
        self.last_tick_ms = now;

        if self.last != prev {
            sink.emit(&AppEvent::DecisionChanged {
                at_ms: now,
                from: prev,
                to: self.last,
            });
        }
        self.last
    }

    /// Read `clock` and run one cycle.
    pub fn tick_with_clock(&mut self, clock: &impl Clock, sink: &mut impl EventSink) -> Decision {
        self.tick(clock.now_ms(), sink)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn last_decision(&self) -> Decision {
        self.last
    }

    pub fn last_tick_ms(&self) -> Millis {
        self.last_tick_ms
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn own_track(&self) -> &OccupancyMonitor<O> {
        &self.own
    }

    pub fn downstream_track(&self) -> &OccupancyMonitor<D> {
        &self.downstream
    }

    pub fn lamp(&self) -> &L {
        &self.lamp
    }
}
