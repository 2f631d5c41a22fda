//! Port traits — the boundary between the decision core and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BlockController (domain)
//! ```
//!
//! Track circuit inputs come in through `embedded-hal`'s `InputPin` and the
//! clock through [`Clock`](crate::hal::Clock).  The two traits below cover
//! the outputs: the lamp and the structured event stream.

use crate::drivers::signal_head::Aspect;

// ───────────────────────────────────────────────────────────────
// Lamp port (driven adapter: domain → signal head)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the signal lamp.
///
/// Implementations must light only the lamp matching `aspect`.
pub trait LampPort {
    fn set_aspect(&mut self, aspect: Aspect);

    /// Aspect last commanded.
    fn current_aspect(&self) -> Aspect;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits [`AppEvent`](super::events::AppEvent)s through this
/// port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
