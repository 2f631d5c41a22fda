//! Configuration loading through the public API.

use blocksignal::config::{Polarity, SystemConfig};
use blocksignal::error::ConfigError;

const FULL: &str = r#"{
    "own_track": { "pin": 4, "polarity": "LowIsClear", "debounce_ms": 80, "stuck_fault_ms": 5000 },
    "downstream_track": { "pin": 5, "polarity": "HighIsClear", "debounce_ms": 80, "stuck_fault_ms": 5000 },
    "signal": { "red_pin": 13, "yellow_pin": 14, "green_pin": 15, "active_high": false },
    "controller": { "max_loop_gap_ms": 250, "tick_interval_ms": 100 }
}"#;

#[test]
fn json_config_loads_every_field() {
    let cfg = SystemConfig::from_json(FULL).unwrap();
    assert_eq!(cfg.own_track.pin, 4);
    assert_eq!(cfg.own_track.polarity, Polarity::LowIsClear);
    assert_eq!(cfg.downstream_track.stuck_fault_ms, 5000);
    assert_eq!(cfg.signal.green_pin, 15);
    assert!(!cfg.signal.active_high);
    assert_eq!(cfg.controller.tick_interval_ms, 100);
}

#[test]
fn json_config_is_validated() {
    let dup = FULL.replace(r#""pin": 5"#, r#""pin": 4"#);
    assert_eq!(
        SystemConfig::from_json(&dup),
        Err(ConfigError::ValidationFailed("pin assigned twice"))
    );

    let short_gap = FULL.replace(r#""max_loop_gap_ms": 250"#, r#""max_loop_gap_ms": 50"#);
    assert!(matches!(
        SystemConfig::from_json(&short_gap),
        Err(ConfigError::ValidationFailed(_))
    ));
}

#[test]
fn malformed_json_is_corrupted() {
    assert_eq!(SystemConfig::from_json("{"), Err(ConfigError::Corrupted));
    assert_eq!(
        SystemConfig::from_json(r#"{"own_track": {}}"#),
        Err(ConfigError::Corrupted)
    );
}

#[test]
fn flash_encoding_survives_storage() {
    let cfg = SystemConfig::from_json(FULL).unwrap();
    let bytes = cfg.to_postcard().unwrap();
    assert_eq!(SystemConfig::from_postcard(&bytes), Ok(cfg));

    assert_eq!(
        SystemConfig::from_postcard(&bytes[..bytes.len() / 2]),
        Err(ConfigError::Corrupted)
    );
}
