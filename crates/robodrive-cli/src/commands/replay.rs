//! Replay recorded frames through a controller

use anyhow::Result;
use robodrive_core::{
    ControllerConfig, LoopbackBus, RawIntention, TickOutput, VehicleController, VehicleTelemetry,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::commands::config::load_config;
use crate::error::{CliError, read_input};
use crate::output;

/// One recorded tick: what the policy asked for and what the car reported.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayFrame {
    #[serde(default)]
    pub intention: RawIntention,
    pub vehicle: VehicleTelemetry,
}

/// Execute replay command
pub fn execute(frames: &Path, config: Option<&Path>, track: Option<&str>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => ControllerConfig::default(),
    };
    let frames = read_frames(frames)?;
    info!(frames = frames.len(), "Replaying recorded frames");

    let mut controller = VehicleController::new(config).map_err(CliError::from)?;
    let outputs = replay(&mut controller, &frames, track)?;

    output::print_replay(&outputs, controller.stats(), json);
    Ok(())
}

/// Parse a JSON Lines file into frames. Blank lines are skipped.
pub fn read_frames(path: &Path) -> Result<Vec<ReplayFrame>, CliError> {
    let content = read_input(path)?;

    let mut frames = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame = serde_json::from_str(line).map_err(|err| CliError::InvalidFrame {
            line: index.saturating_add(1),
            reason: err.to_string(),
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Run every frame through `controller` as one race.
pub fn replay(
    controller: &mut VehicleController,
    frames: &[ReplayFrame],
    track: Option<&str>,
) -> Result<Vec<TickOutput>, CliError> {
    if let Some(track) = track {
        controller.on_track_change(track);
    }
    controller.on_race_start();

    let mut bus = LoopbackBus::new();
    let mut outputs = Vec::with_capacity(frames.len());
    for frame in frames {
        bus.set_intention(frame.intention);
        let output = controller.step(&mut bus, &frame.vehicle)?;
        debug!(race_time = frame.vehicle.race_time, gear = %output.command.gear, "Replayed frame");
        outputs.push(output);
    }

    controller.on_race_end();
    Ok(outputs)
}
