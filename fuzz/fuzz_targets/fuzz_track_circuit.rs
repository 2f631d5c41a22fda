//! Fuzz target: `OccupancyMonitor::sample`
//!
//! The first bytes pick the windows; every following byte is one sample:
//! low 7 bits are the time step, the top bit the raw level.  Checks:
//! - No panics, including across the counter wrap
//! - The monitor is only ever unhealthy while it reads occupied
//!
//! cargo fuzz run fuzz_track_circuit

#![no_main]

use blocksignal::adapters::sim_gpio::SimGpio;
use blocksignal::config::TrackCircuitConfig;
use blocksignal::sensors::track_circuit::OccupancyMonitor;
use libfuzzer_sys::fuzz_target;

const PIN: u16 = 2;

fuzz_target!(|data: &[u8]| {
    let [debounce, stuck, start, samples @ ..] = data else {
        return;
    };

    let cfg = TrackCircuitConfig {
        debounce_ms: u32::from(*debounce),
        stuck_fault_ms: u32::from(*stuck) * 10,
        ..TrackCircuitConfig::with_pin(PIN)
    };
    let gpio = SimGpio::new();
    gpio.set_input_level(PIN, true);
    let mut monitor = OccupancyMonitor::new(cfg, gpio.input(PIN));
    monitor.initialize();

    // Start close to the wrap so long inputs cross it.
    let mut now = u32::MAX - u32::from(*start) * 64;
    for byte in samples {
        now = now.wrapping_add(u32::from(byte & 0x7f));
        gpio.set_input_level(PIN, byte & 0x80 != 0);
        monitor.sample(now);
        assert!(
            monitor.healthy() || monitor.occupied(),
            "unhealthy while clear at t={now}"
        );
    }
});
