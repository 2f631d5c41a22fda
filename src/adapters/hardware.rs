//! Hardware adapter — bridges the signal head driver to the lamp port, and
//! assembles a full controller from a [`SystemConfig`] and a pin source.

use crate::app::ports::LampPort;
use crate::app::service::BlockController;
use crate::config::SystemConfig;
use crate::drivers::signal_head::{Aspect, SignalHead};
use crate::hal::{InputPin, OutputPin, Pin};
use crate::sensors::track_circuit::OccupancyMonitor;

use super::sim_gpio::{SimGpio, SimInputPin, SimOutputPin};

// ── LampPort implementation ───────────────────────────────────

impl<P: OutputPin> LampPort for SignalHead<P> {
    fn set_aspect(&mut self, aspect: Aspect) {
        SignalHead::set_aspect(self, aspect);
    }

    fn current_aspect(&self) -> Aspect {
        SignalHead::current_aspect(self)
    }
}

/// Controller wired to real (or simulated) pins.
pub type HardwareController<I, P> = BlockController<I, I, SignalHead<P>>;

/// Build a controller whose inputs and outputs all come from one pin
/// factory.  The signal head is driven to Stop before this returns.
pub fn build_controller<I, P>(
    cfg: &SystemConfig,
    mut input: impl FnMut(Pin) -> I,
    mut output: impl FnMut(Pin) -> P,
) -> HardwareController<I, P>
where
    I: InputPin,
    P: OutputPin,
{
    let own = OccupancyMonitor::new(cfg.own_track, input(cfg.own_track.pin));
    let downstream = OccupancyMonitor::new(cfg.downstream_track, input(cfg.downstream_track.pin));
    let mut head = SignalHead::new(
        cfg.signal,
        output(cfg.signal.red_pin),
        output(cfg.signal.yellow_pin),
        output(cfg.signal.green_pin),
    );
    head.init();
    BlockController::new(cfg.controller, own, downstream, head)
}

/// Build a controller on a [`SimGpio`] bank.
pub fn build_sim_controller(
    cfg: &SystemConfig,
    gpio: &SimGpio,
) -> HardwareController<SimInputPin, SimOutputPin> {
    build_controller(cfg, |pin| gpio.input(pin), |pin| gpio.output(pin))
}
