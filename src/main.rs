//! Black hole merge simulator entry point
//!
//! Runs a session headless on a synthetic 144 Hz clock until the bodies merge
//! or the frame cap is reached, then prints the recap and final state.

use std::process::ExitCode;

use blackhole_merge::consts::*;
use blackhole_merge::{Session, Settings, SettingsError};

/// Ten minutes of frames at the target cadence
const MAX_FRAMES: u64 = FPS * 600;
/// Progress log interval
const LOG_EVERY: u64 = FPS * 5;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

fn load_settings() -> Result<Settings, CliError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(Settings::from_json(&json)?)
        }
        None => {
            log::info!("Using default settings");
            Ok(Settings::default())
        }
    }
}

fn run() -> Result<(), CliError> {
    let settings = load_settings()?;
    let mut session = Session::new(settings);
    let period = session.clock().frame_period_nanos();
    session.start();

    let mut now = 0;
    for frame in 1..=MAX_FRAMES {
        now += period;
        let report = session.frame(now);
        if report.ended() {
            break;
        }
        if frame % LOG_EVERY == 0 {
            let snap = session.snapshot();
            log::debug!(
                "t={:.2} f={:.1} Hz primary=({:.1}, {:.1}) secondary=({:.1}, {:.1})",
                snap.elapsed_time,
                snap.wave_frequency,
                snap.primary.x,
                snap.primary.y,
                snap.secondary.x,
                snap.secondary.y
            );
        }
    }

    match session.recap() {
        Some(recap) => println!("{}", recap),
        None => log::warn!("No merge after {} frames", MAX_FRAMES),
    }
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Black hole merge simulator starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
