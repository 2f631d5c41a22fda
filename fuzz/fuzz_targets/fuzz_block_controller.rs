//! Fuzz target: `BlockController::tick`
//!
//! Each 3-byte chunk is one cycle: time step (u16 LE) and a flags byte
//! carrying both track levels plus read faults.  Checks:
//! - No panics
//! - The lamp always shows the decision's aspect, with exactly one lamp lit
//! - An occupied own block never shows anything but Stop
//!
//! cargo fuzz run fuzz_block_controller

#![no_main]

use blocksignal::adapters::hardware::build_sim_controller;
use blocksignal::adapters::log_sink::LogEventSink;
use blocksignal::adapters::sim_gpio::SimGpio;
use blocksignal::config::SystemConfig;
use blocksignal::drivers::signal_head::Aspect;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let cfg = SystemConfig::default();
    let gpio = SimGpio::new();
    gpio.set_input_level(cfg.own_track.pin, true);
    gpio.set_input_level(cfg.downstream_track.pin, true);
    let mut ctrl = build_sim_controller(&cfg, &gpio);
    let mut sink = LogEventSink::new();

    let mut now: u32 = 0;
    ctrl.initialize(now, &mut sink);

    for chunk in data.chunks_exact(3) {
        now = now.wrapping_add(u32::from(u16::from_le_bytes([chunk[0], chunk[1]])));
        let flags = chunk[2];
        gpio.set_input_level(cfg.own_track.pin, flags & 0x01 != 0);
        gpio.set_input_level(cfg.downstream_track.pin, flags & 0x02 != 0);
        gpio.inject_read_fault(cfg.own_track.pin, flags & 0x04 != 0);
        gpio.inject_read_fault(cfg.downstream_track.pin, flags & 0x08 != 0);

        let d = ctrl.tick(now, &mut sink);

        assert_eq!(ctrl.lamp().current_aspect(), d.aspect);
        let s = cfg.signal;
        let lit = [s.red_pin, s.yellow_pin, s.green_pin]
            .iter()
            .filter(|pin| gpio.level(**pin) == s.active_high)
            .count();
        assert_eq!(lit, 1);
        if ctrl.own_track().occupied() {
            assert_eq!(d.aspect, Aspect::Stop);
        }
    }
});
