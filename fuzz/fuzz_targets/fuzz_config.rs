//! Fuzz target: `SystemConfig::from_postcard` / `from_json`
//!
//! Arbitrary bytes must either decode into a config that passes
//! validation or be rejected with a typed error; never panic.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use blocksignal::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(cfg) = SystemConfig::from_postcard(data) {
        assert!(cfg.validate().is_ok());
        let bytes = cfg.to_postcard().expect("valid config re-encodes");
        assert_eq!(SystemConfig::from_postcard(&bytes), Ok(cfg));
    }

    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(cfg) = SystemConfig::from_json(text) {
            assert!(cfg.validate().is_ok());
        }
    }
});
