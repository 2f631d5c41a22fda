//! Application core — pure domain logic, zero I/O.
//!
//! The per-cycle orchestration of the block controller lives here.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`] and the `embedded-hal` pin traits, keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
