//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the `log`
//! facade.  A telemetry uplink would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::types::Health;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { at_ms, decision } => {
                info!("START | t={}ms | {}", at_ms, decision);
            }
            AppEvent::DecisionChanged { at_ms, from, to } => {
                if to.health == Health::Ok {
                    info!("SIGNAL | t={}ms | {} -> {}", at_ms, from, to);
                } else {
                    warn!("SIGNAL | t={}ms | {} -> {}", at_ms, from, to);
                }
            }
        }
    }
}
