//! Track circuit inputs.

pub mod track_circuit;

pub use track_circuit::OccupancyMonitor;
