//! Interlocking decision.
//!
//! Pure and total: every combination of the four input flags maps to exactly
//! one `(aspect, reason, health)` triple.  The rules form a strict priority
//! chain; the first one that applies decides and nothing after it is
//! consulted.
//!
//! | # | Condition             | Aspect  | Reason            | Health   |
//! |---|-----------------------|---------|-------------------|----------|
//! | 1 | loop not fresh        | Stop    | ControllerStale   | Fault    |
//! | 2 | own circuit unhealthy | Stop    | TrackCircuitFault | Degraded |
//! | 3 | own block occupied    | Stop    | OwnBlockOccupied  | Ok       |
//! | 4 | next block occupied   | Caution | DownstreamStop    | Ok       |
//! | 5 | otherwise             | Clear   | None              | Ok       |
//!
//! Occupancy readings are only meaningful once the loop is live and the
//! circuit is healthy, hence rules 1 and 2 sit above any occupancy rule.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::signal_head::Aspect;
use crate::types::Health;

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StopReason {
    None = 0,
    OwnBlockOccupied = 1,
    DownstreamStop = 2,
    TrackCircuitFault = 3,
    ControllerStale = 4,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::OwnBlockOccupied => "OwnBlockOccupied",
            Self::DownstreamStop => "DownstreamStop",
            Self::TrackCircuitFault => "TrackCircuitFault",
            Self::ControllerStale => "ControllerStale",
        };
        f.write_str(s)
    }
}

/// One cycle's worth of facts about the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    pub own_occupied: bool,
    pub downstream_occupied: bool,
    pub own_track_healthy: bool,
    pub controller_fresh: bool,
}

impl Inputs {
    /// The most restrictive reading: loop stale, circuit unhealthy, both
    /// blocks occupied.  Used before any sensor has been read.
    pub const CONSERVATIVE: Self = Self {
        own_occupied: true,
        downstream_occupied: true,
        own_track_healthy: false,
        controller_fresh: false,
    };
}

impl Default for Inputs {
    fn default() -> Self {
        Self::CONSERVATIVE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub aspect: Aspect,
    pub reason: StopReason,
    pub health: Health,
}

impl Decision {
    const fn new(aspect: Aspect, reason: StopReason, health: Health) -> Self {
        Self {
            aspect,
            reason,
            health,
        }
    }
}

impl Default for Decision {
    fn default() -> Self {
        evaluate(&Inputs::CONSERVATIVE)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.aspect, self.reason, self.health)
    }
}

/// The rule that fires for a set of inputs, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    ControllerStale,
    TrackCircuitFault,
    OwnBlockOccupied,
    DownstreamOccupied,
    LineClear,
}

impl Rule {
    fn select(inputs: &Inputs) -> Self {
        match (
            inputs.controller_fresh,
            inputs.own_track_healthy,
            inputs.own_occupied,
            inputs.downstream_occupied,
        ) {
            (false, _, _, _) => Self::ControllerStale,
            (true, false, _, _) => Self::TrackCircuitFault,
            (true, true, true, _) => Self::OwnBlockOccupied,
            (true, true, false, true) => Self::DownstreamOccupied,
            (true, true, false, false) => Self::LineClear,
        }
    }

    const fn decision(self) -> Decision {
        match self {
            Self::ControllerStale => {
                Decision::new(Aspect::Stop, StopReason::ControllerStale, Health::Fault)
            }
            Self::TrackCircuitFault => {
                Decision::new(Aspect::Stop, StopReason::TrackCircuitFault, Health::Degraded)
            }
            Self::OwnBlockOccupied => {
                Decision::new(Aspect::Stop, StopReason::OwnBlockOccupied, Health::Ok)
            }
            Self::DownstreamOccupied => {
                Decision::new(Aspect::Caution, StopReason::DownstreamStop, Health::Ok)
            }
            Self::LineClear => Decision::new(Aspect::Clear, StopReason::None, Health::Ok),
        }
    }
}

/// Evaluate the interlocking rules.
pub fn evaluate(inputs: &Inputs) -> Decision {
    Rule::select(inputs).decision()
}
