//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements          | Connects to                   |
//! |-------------|---------------------|-------------------------------|
//! | `hardware`  | LampPort            | SignalHead over OutputPin     |
//! | `log_sink`  | EventSink           | `log` facade                  |
//! | `sim_gpio`  | InputPin, OutputPin | in-memory 256-line GPIO bank  |
//! | `time`      | Clock               | host monotonic / manual clock |

pub mod hardware;
pub mod log_sink;
pub mod sim_gpio;
pub mod time;
