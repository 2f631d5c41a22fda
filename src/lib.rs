//! Single-block railway signal controller.
//!
//! Reads two track circuits (our block and the next one), debounces them,
//! watches our own circuit for a stuck-occupied fault, and drives a
//! three-aspect signal head through a fixed priority chain:
//!
//! 1. controller loop stale      → STOP
//! 2. own track circuit faulty   → STOP
//! 3. own block occupied         → STOP
//! 4. next block occupied        → CAUTION
//! 5. otherwise                  → CLEAR
//!
//! Hardware is reached only through `embedded-hal` pins and the [`hal::Clock`]
//! trait; the simulated bank in [`adapters::sim_gpio`] backs the tests and
//! the host demo.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod logic;
pub mod pins;
pub mod scenario;
pub mod sensors;
pub mod types;
