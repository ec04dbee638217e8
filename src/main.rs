//! Maskquerade - headless entry point
//!
//! Plays one fight on autopilot and prints the run summary as JSON:
//!
//! ```text
//! maskquerade [BOSS] [SEED] [--tuning FILE] [--settings FILE] [--quality LEVEL]
//! ```
//!
//! Without `--tuning`, `MASKQUERADE_TUNING` may point at a JSON tuning file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use maskquerade::consts::SIM_DT;
use maskquerade::renderer::DrawList;
use maskquerade::sim::BossKind;
use maskquerade::{QualityPreset, Screen, ScreenEvent, Session, Settings, Tuning};

/// Give up on a fight after this many simulated seconds
const MAX_FIGHT_SECONDS: f32 = 300.0;

#[derive(Parser)]
#[command(name = "maskquerade")]
#[command(about = "Play one Maskquerade boss fight on autopilot")]
struct Opts {
    /// Boss to fight: pumpking, bride or scarecrow
    #[arg(default_value = "pumpking", value_parser = parse_boss)]
    boss: BossKind,
    /// Seed for the arena RNG
    #[arg(default_value_t = 1)]
    seed: u64,
    /// JSON tuning file (overrides MASKQUERADE_TUNING)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Quality preset: low, medium or high
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_boss(s: &str) -> Result<BossKind, String> {
    BossKind::from_name(s).ok_or_else(|| format!("unknown boss '{}'", s))
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::from_name(s).ok_or_else(|| format!("unknown quality preset '{}'", s))
}

fn main() -> ExitCode {
    env_logger::init();

    let opts = Opts::parse();
    let kind = opts.boss;

    let tuning_path = opts
        .tuning
        .or_else(|| std::env::var_os("MASKQUERADE_TUNING").map(PathBuf::from));
    let tuning = tuning_path.as_deref().map(load_tuning).unwrap_or_default();
    let settings = load_settings(opts.settings.as_deref(), opts.quality);

    log::info!(
        "Maskquerade (headless) vs {} with seed {}, quality {}",
        kind.name(),
        opts.seed,
        settings.quality.as_str()
    );
    let mut session = Session::new(opts.seed, tuning, settings);

    let setup = [
        ScreenEvent::Confirm,
        ScreenEvent::Confirm,
        ScreenEvent::ChooseBoss(kind),
    ];
    for event in setup {
        if let Err(e) = session.handle(event) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    session.input.autopilot = true;

    while session.screen == Screen::Playing && session.arena.time < MAX_FIGHT_SECONDS {
        session.frame(SIM_DT);
    }

    let mut frame = DrawList::new();
    session.draw(&mut frame);
    log::debug!("Final frame: {} draw calls", frame.len());

    match serde_json::to_string_pretty(&session.summary()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not serialize summary: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Tuning from a JSON file, or defaults if it is unusable
fn load_tuning(path: &Path) -> Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {} ({}), using defaults", path.display(), e);
            Tuning::default()
        }
    }
}

/// Settings file (if any), then the quality preset on top
fn load_settings(path: Option<&Path>, quality: Option<QualityPreset>) -> Settings {
    let mut settings = match path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings {} ({}), using defaults", path.display(), e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    if let Some(preset) = quality {
        settings.apply_preset(preset);
    }
    settings
}
