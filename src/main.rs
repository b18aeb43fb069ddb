//! CatPoint scenario runner — host entry point.
//!
//! Replays a JSON scenario against the alarm core wired to in-memory
//! adapters, logging every event and printing the final status.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Scenario file ──▶ SecurityCommand stream                │
//! │                                                          │
//! │  MemoryRepository   LogEventSink   Scripted/Fake camera  │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │           SecurityService (alarm rules)                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenario format:
//!
//! ```json
//! {
//!   "config":  { "cat_confidence_threshold": 50.0 },
//!   "arming":  "ARMED_AWAY",
//!   "sensors": [ { "name": "Front door", "sensor_type": "DOOR" } ],
//!   "steps": [
//!     { "run": { "command": "set_sensor_active", "name": "Front door", "active": true } },
//!     { "run": { "command": "process_image" }, "cat": true }
//!   ]
//! }
//! ```
#![deny(unused_must_use)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;

use catpoint::adapters::fake_image::FakeImageAnalyzer;
use catpoint::adapters::log_sink::LogEventSink;
use catpoint::adapters::memory::{MemoryConfigStore, MemoryRepository};
use catpoint::adapters::scripted::ScriptedAnalyzer;
use catpoint::app::commands::SecurityCommand;
use catpoint::app::events::StatusSnapshot;
use catpoint::app::ports::{ConfigPort, ImageAnalyzer};
use catpoint::app::service::SecurityService;
use catpoint::config::SecurityConfig;
use catpoint::fsm::{AlarmStatus, ArmingStatus};
use catpoint::sensors::Sensor;

// ── CLI ───────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "catpoint", version, about = "Replay a security scenario against the alarm core")]
struct Cli {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Use the random stand-in camera instead of the scenario's scripted verdicts
    #[arg(long)]
    fake_camera: bool,

    /// Seed for --fake-camera
    #[arg(long, requires = "fake_camera")]
    seed: Option<u64>,

    /// Print the final status as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

// ── Scenario file ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: Option<SecurityConfig>,
    #[serde(default)]
    arming: ArmingStatus,
    #[serde(default)]
    alarm: AlarmStatus,
    #[serde(default)]
    sensors: Vec<Sensor>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    run: SecurityCommand,
    /// Scripted camera verdict for a `process_image` step.
    #[serde(default)]
    cat: Option<bool>,
}

/// Placeholder frame handed to the analyzer on every `process_image` step.
const FRAME_LEN: usize = 64;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("CatPoint v{}", env!("CARGO_PKG_VERSION"));

    let raw = fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading {}", cli.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", cli.scenario.display()))?;

    let snapshot = if cli.fake_camera {
        let analyzer = match cli.seed {
            Some(seed) => FakeImageAnalyzer::seeded(seed),
            None => FakeImageAnalyzer::new(),
        };
        run(scenario, analyzer, |_, cat| {
            if cat.is_some() {
                warn!("Scripted verdict ignored with --fake-camera");
            }
        })?
    } else {
        run(scenario, ScriptedAnalyzer::new(), |analyzer, cat| {
            if let Some(cat) = cat {
                analyzer.push(Ok(cat));
            }
        })?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Alarm:  {} ({})", snapshot.alarm, snapshot.alarm.description());
        println!("Arming: {} ({})", snapshot.arming, snapshot.arming.description());
        for sensor in &snapshot.sensors {
            println!("  {}", sensor);
        }
    }
    Ok(())
}

/// Build the service around `analyzer` and replay every step.
/// `script` sees each step's camera verdict before the step runs.
fn run<A>(
    scenario: Scenario,
    analyzer: A,
    mut script: impl FnMut(&mut A, Option<bool>),
) -> Result<StatusSnapshot>
where
    A: ImageAnalyzer<Image = Vec<u8>>,
{
    let repo = MemoryRepository::with_state(scenario.sensors, scenario.arming, scenario.alarm);
    let mut service = SecurityService::new(repo, analyzer);

    let mut store = MemoryConfigStore::new();
    if let Some(config) = scenario.config {
        store.save(&config).context("scenario config")?;
    }
    service.load_config(&store)?;

    let mut sink = LogEventSink::new();
    let frame = vec![0xA5u8; FRAME_LEN];

    for (idx, step) in scenario.steps.into_iter().enumerate() {
        script(service.analyzer_mut(), step.cat);
        info!("STEP {} | {:?}", idx + 1, step.run);
        service
            .handle_command(step.run, Some(&frame), &mut sink)
            .with_context(|| format!("step {}", idx + 1))?;
    }

    Ok(service.snapshot()?)
}
