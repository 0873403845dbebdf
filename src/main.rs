//! SOS Light: host entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HostHardware        LogEventSink   SettingsStore        │
//! │  (Torch+Screen+Chime) (EventSink)   (Config+Diary)       │
//! │  console::parse_command ──▶ CMD_CHANNEL                  │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            SosService (pure logic)                 │  │
//! │  │  SignalPlayer · WaypointTracker · Diary            │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  ControlLoop (edge-executor, async-io-mini timers)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `sos-light [settings.json]`, then type commands on stdin
//! (`start`, `stop`, `toggle`, `sound on`, `pos <lat> <lon>`, `mark`,
//! `note high <text>`, `export`, `quit`, ...).  Blank lines are ignored.
#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use sos_light::adapters::console::parse_command;
use sos_light::adapters::hardware::HostHardware;
use sos_light::adapters::log_sink::LogEventSink;
use sos_light::adapters::settings::SettingsStore;
use sos_light::app::commands::AppCommand;
use sos_light::app::ports::{ConfigPort, DiaryPort};
use sos_light::app::service::SosService;
use sos_light::drivers::torch::TorchClaim;
use sos_light::runtime::{CMD_CHANNEL, ControlLoop, run_blocking};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("SOS Light v{}", env!("CARGO_PKG_VERSION"));

    // ── Settings ──────────────────────────────────────────────
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SettingsStore::from_json_file(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SettingsStore::new(),
    };
    let config = settings.load().unwrap_or_else(|e| {
        warn!("Settings load failed ({}), using defaults", e);
        Default::default()
    });
    info!(
        "Slot period {} ms, cycle pause {} ms, sound {}",
        config.slot_period_ms,
        config.cycle_pause_ms,
        if config.sound_enabled { "on" } else { "off" }
    );

    // ── Adapters ──────────────────────────────────────────────
    let hw = HostHardware::host(TorchClaim::new());
    let diary = settings.load_diary().unwrap_or_else(|e| {
        warn!("Diary load failed ({}), starting empty", e);
        Default::default()
    });
    let service = SosService::with_diary(config, diary);
    let mut control = ControlLoop::new(service, hw, LogEventSink::new(), &settings);

    // ── Console reader ────────────────────────────────────────
    std::thread::Builder::new()
        .name("console".into())
        .spawn(read_console)
        .context("spawning console thread")?;

    info!("Ready. Type `start` to signal, `quit` to exit.");
    run_blocking(&mut control, &CMD_CHANNEL);

    let (service, hw, _) = control.into_parts();
    info!(
        "Exit: {} ticks, torch {}, {} chime pulses",
        service.tick_count(),
        if hw.torch().is_lit() { "lit" } else { "dark" },
        hw.chime().pulses()
    );
    Ok(())
}

/// Forward stdin lines to the control loop until EOF or `quit`.
fn read_console() {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match parse_command(&line) {
            Some(cmd) => {
                let quit = cmd == AppCommand::Shutdown;
                futures_lite::future::block_on(CMD_CHANNEL.send(cmd));
                if quit {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => warn!("Unknown command: {:?}", line.trim()),
        }
    }
    futures_lite::future::block_on(CMD_CHANNEL.send(AppCommand::Shutdown));
}
