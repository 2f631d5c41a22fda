//! Block signal controller — host demo.
//!
//! Runs the scripted scenario against simulated pins and logs every aspect
//! change.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  SimGpio          SignalHead        LogEventSink         │
//! │  (embedded-hal)   (LampPort)        (EventSink)          │
//! │  SimClock / SystemClock (Clock)                          │
//! │                                                          │
//! │  ───────────────── Port Trait Boundary ───────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │   BlockController (OccupancyMonitor × 2 +          │  │
//! │  │                    interlocking evaluate)          │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use blocksignal::adapters::log_sink::LogEventSink;
use blocksignal::adapters::time::{SimClock, SystemClock};
use blocksignal::config::SystemConfig;
use blocksignal::hal::Clock;
use blocksignal::scenario::{self, Scenario, Timeline};

#[derive(Parser, Debug)]
#[command(name = "blocksignal")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON system configuration (defaults to the demo configuration)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON list of `{at_ms, pin, high}` track events (defaults to the demo run)
    #[arg(short, long)]
    timeline: Option<PathBuf>,

    /// Number of control cycles to run
    #[arg(short = 'n', long, default_value = "80")]
    ticks: u32,

    /// Follow the wall clock instead of stepping simulated time
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => scenario::demo_config(),
    };
    let timeline = match &args.timeline {
        Some(path) => load_timeline(path)?,
        None => scenario::demo_timeline(&cfg),
    };

    info!(
        "blocksignal: {} ticks @ {}ms, {} events, {}",
        args.ticks,
        cfg.controller.tick_interval_ms,
        timeline.len(),
        if args.realtime { "realtime" } else { "simulated time" }
    );

    if args.realtime {
        let tick = Duration::from_millis(u64::from(cfg.controller.tick_interval_ms));
        run(&cfg, timeline, SystemClock::new(), args.ticks, |_| {
            std::thread::sleep(tick);
        })
    } else {
        let clock = SimClock::new(0);
        let step = cfg.controller.tick_interval_ms;
        run(&cfg, timeline, &clock, args.ticks, |c| {
            c.advance(step);
        })
    }
}

/// Start the scenario and step it `ticks` times, calling `wait` before
/// each step.
fn run<C: Clock>(
    cfg: &SystemConfig,
    timeline: Timeline,
    clock: C,
    ticks: u32,
    mut wait: impl FnMut(&C),
) -> Result<()> {
    let mut sink = LogEventSink::new();
    let mut scenario =
        Scenario::new(cfg, timeline, clock).context("building scenario")?;
    scenario.start(&mut sink);

    for _ in 0..ticks {
        wait(scenario.clock());
        scenario.step(&mut sink);
    }

    let ctrl = scenario.controller();
    info!(
        "done: {} ticks, {}ms elapsed, final {}",
        ctrl.tick_count(),
        scenario.elapsed_ms(),
        ctrl.last_decision()
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<SystemConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SystemConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_timeline(path: &Path) -> Result<Timeline> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading timeline {}", path.display()))?;
    scenario::timeline_from_json(&text)
        .with_context(|| format!("parsing timeline {}", path.display()))
}
