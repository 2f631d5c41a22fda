//! BlockController integration tests.
//!
//! Drive the controller through train movements, stuck circuits, stalled
//! loops and I/O failures at the 50 ms default cadence.

use blocksignal::adapters::hardware::build_sim_controller;
use blocksignal::adapters::sim_gpio::SimGpio;
use blocksignal::config::{Polarity, SystemConfig, TrackCircuitConfig};
use blocksignal::drivers::signal_head::Aspect;
use blocksignal::error::HalError;
use blocksignal::logic::interlocking::{Decision, StopReason};
use blocksignal::types::{Health, Millis};

use crate::mock_hw::{RecordingSink, Rig};

fn summary(changes: &[(Millis, Decision)]) -> Vec<(Millis, Aspect, StopReason)> {
    changes.iter().map(|(t, d)| (*t, d.aspect, d.reason)).collect()
}

#[test]
fn train_passes_through_both_blocks() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    assert_eq!(rig.run(0, 500, 50).aspect, Aspect::Clear);

    rig.set_downstream_clear(false);
    assert_eq!(rig.run(500, 600, 50).aspect, Aspect::Caution);

    rig.set_own_clear(false);
    assert_eq!(rig.run(600, 700, 50).reason, StopReason::OwnBlockOccupied);

    rig.set_own_clear(true);
    assert_eq!(rig.run(700, 800, 50).aspect, Aspect::Caution);

    rig.set_downstream_clear(true);
    assert_eq!(rig.run(800, 900, 50).aspect, Aspect::Clear);

    assert_eq!(
        summary(&rig.sink.changes()),
        vec![
            (50, Aspect::Clear, StopReason::None),
            (600, Aspect::Caution, StopReason::DownstreamStop),
            (700, Aspect::Stop, StopReason::OwnBlockOccupied),
            (800, Aspect::Caution, StopReason::DownstreamStop),
            (900, Aspect::Clear, StopReason::None),
        ]
    );
}

#[test]
fn lamp_follows_every_decision() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    rig.set_downstream_clear(false);
    rig.run(0, 300, 50);

    // One command per cycle, plus the startup Stop.
    assert_eq!(rig.ctrl.lamp().shown.len(), 7);
    assert_eq!(rig.ctrl.lamp().shown[0], Aspect::Stop);
    assert_eq!(rig.ctrl.lamp().shown[6], Aspect::Caution);
}

#[test]
fn stuck_own_circuit_degrades_then_recovers() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    rig.set_own_clear(false);

    // Debounced occupied at t=100; stuck window is 3000 ms.
    let d = rig.run(0, 3050, 50);
    assert_eq!(d.reason, StopReason::OwnBlockOccupied);
    assert!(rig.ctrl.own_track().healthy());

    let d = rig.tick(3100);
    assert_eq!(d.aspect, Aspect::Stop);
    assert_eq!(d.reason, StopReason::TrackCircuitFault);
    assert_eq!(d.health, Health::Degraded);

    rig.set_own_clear(true);
    assert_eq!(rig.tick(3150).reason, StopReason::TrackCircuitFault);
    let d = rig.tick(3200);
    assert_eq!(d.aspect, Aspect::Clear);
    assert_eq!(d.health, Health::Ok);
    assert!(rig.ctrl.own_track().healthy());
}

#[test]
fn stuck_downstream_circuit_only_shows_caution() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    rig.set_downstream_clear(false);

    let d = rig.run(0, 5000, 50);
    assert!(!rig.ctrl.downstream_track().healthy());
    assert_eq!(d.aspect, Aspect::Caution);
    assert_eq!(d.health, Health::Ok);
}

#[test]
fn loop_gap_beyond_limit_forces_stop_for_one_cycle() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    rig.run(0, 200, 50);

    // Exactly at the limit is still fresh.
    assert_eq!(rig.tick(400).aspect, Aspect::Clear);

    let d = rig.tick(601);
    assert_eq!(d.reason, StopReason::ControllerStale);
    assert_eq!(d.health, Health::Fault);

    assert_eq!(rig.tick(651).aspect, Aspect::Clear);
}

#[test]
fn unreadable_input_counts_as_occupied() {
    let mut rig = Rig::with_defaults();
    rig.start(0);
    rig.run(0, 100, 50);

    let pin = rig.cfg.own_track.pin;
    rig.gpio.inject_read_fault(pin, true);
    let d = rig.run(100, 200, 50);
    assert_eq!(d.reason, StopReason::OwnBlockOccupied);
    assert_eq!(
        rig.ctrl.own_track().read_fault(),
        Some(HalError::InputReadFailed { pin })
    );

    rig.gpio.inject_read_fault(pin, false);
    assert_eq!(rig.run(200, 300, 50).aspect, Aspect::Clear);
    assert_eq!(rig.ctrl.own_track().read_fault(), None);
}

#[test]
fn inverted_polarity_circuits() {
    let own = TrackCircuitConfig {
        polarity: Polarity::LowIsClear,
        ..TrackCircuitConfig::with_pin(20)
    };
    let downstream = TrackCircuitConfig {
        polarity: Polarity::LowIsClear,
        ..TrackCircuitConfig::with_pin(21)
    };
    let mut rig = Rig::new(own, downstream);
    rig.start(0);
    assert!(!rig.gpio.level(20));
    assert_eq!(rig.run(0, 100, 50).aspect, Aspect::Clear);

    rig.gpio.set_input_level(21, true);
    assert_eq!(rig.run(100, 200, 50).aspect, Aspect::Caution);
}

#[test]
fn runs_across_counter_wrap() {
    let mut rig = Rig::with_defaults();
    let mut t: Millis = u32::MAX - 120;
    rig.start(t);

    for _ in 0..6 {
        t = t.wrapping_add(50);
        assert_eq!(rig.tick(t).aspect, Aspect::Clear);
    }
    assert!(t < 1000);

    rig.set_own_clear(false);
    t = t.wrapping_add(50);
    rig.tick(t);
    t = t.wrapping_add(50);
    assert_eq!(rig.tick(t).reason, StopReason::OwnBlockOccupied);
}

// ── Real signal head on simulated outputs ─────────────────────

fn lit(gpio: &SimGpio, cfg: &SystemConfig) -> [bool; 3] {
    let s = cfg.signal;
    [
        gpio.level(s.red_pin) == s.active_high,
        gpio.level(s.yellow_pin) == s.active_high,
        gpio.level(s.green_pin) == s.active_high,
    ]
}

#[test]
fn signal_head_lights_exactly_one_lamp() {
    let cfg = SystemConfig::default();
    let gpio = SimGpio::new();
    gpio.set_input_level(cfg.own_track.pin, true);
    gpio.set_input_level(cfg.downstream_track.pin, true);
    let mut ctrl = build_sim_controller(&cfg, &gpio);
    let mut sink = RecordingSink::default();

    assert_eq!(lit(&gpio, &cfg), [true, false, false]);
    ctrl.initialize(0, &mut sink);
    assert_eq!(lit(&gpio, &cfg), [true, false, false]);

    ctrl.tick(50, &mut sink);
    assert_eq!(lit(&gpio, &cfg), [false, false, true]);

    gpio.set_input_level(cfg.downstream_track.pin, false);
    ctrl.tick(100, &mut sink);
    ctrl.tick(150, &mut sink);
    assert_eq!(lit(&gpio, &cfg), [false, true, false]);
    assert_eq!(ctrl.lamp().current_aspect(), Aspect::Caution);
}

#[test]
fn active_low_signal_head() {
    let mut cfg = SystemConfig::default();
    cfg.signal.active_high = false;
    let gpio = SimGpio::new();
    gpio.set_input_level(cfg.own_track.pin, true);
    gpio.set_input_level(cfg.downstream_track.pin, true);
    let mut ctrl = build_sim_controller(&cfg, &gpio);
    let mut sink = RecordingSink::default();

    ctrl.initialize(0, &mut sink);
    assert!(!gpio.level(cfg.signal.red_pin));
    assert!(gpio.level(cfg.signal.green_pin));

    ctrl.tick(50, &mut sink);
    assert_eq!(lit(&gpio, &cfg), [false, false, true]);
    assert!(!gpio.level(cfg.signal.green_pin));
}

#[test]
fn lamp_write_failure_is_latched_not_fatal() {
    let cfg = SystemConfig::default();
    let gpio = SimGpio::new();
    gpio.set_input_level(cfg.own_track.pin, true);
    gpio.set_input_level(cfg.downstream_track.pin, true);
    let mut ctrl = build_sim_controller(&cfg, &gpio);
    let mut sink = RecordingSink::default();
    ctrl.initialize(0, &mut sink);

    gpio.inject_write_fault(cfg.signal.green_pin, true);
    assert_eq!(ctrl.tick(50, &mut sink).aspect, Aspect::Clear);
    assert_eq!(
        ctrl.lamp().lamp_fault(),
        Some(HalError::OutputWriteFailed {
            pin: cfg.signal.green_pin
        })
    );
    // The failed lamp stays dark; nothing else is lit.
    assert_eq!(lit(&gpio, &cfg), [false, false, false]);

    gpio.inject_write_fault(cfg.signal.green_pin, false);
    ctrl.tick(100, &mut sink);
    assert_eq!(ctrl.lamp().lamp_fault(), None);
    assert_eq!(lit(&gpio, &cfg), [false, false, true]);
}
