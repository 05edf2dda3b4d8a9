//! Per-tick outputs: the actuator command and the telemetry report.

use robodrive_transmission::GearCommand;
use serde::{Deserialize, Serialize};

/// Command written into the vehicle control record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Steering in `[-1, 1]`
    pub steer: f64,
    /// Gear relative to neutral
    pub gear: GearCommand,
    pub clutch: f64,
    /// Brake in `[0, 1]`
    pub brake: f64,
    /// Throttle in `[0, 1]`
    pub accel: f64,
}

/// Telemetry published to the intention source after each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    /// Signed longitudinal speed in m/s
    pub speed: f64,
    /// Heading error against the track tangent in radians
    pub angle: f64,
    pub damage: i32,
    /// Signed distance to the track middle in metres
    pub track_position: f64,
    pub end_of_episode: bool,
}

impl TelemetryReport {
    /// Episode flag as the `0`/`1` integer consumers expect.
    pub fn episode_flag(&self) -> u8 {
        u8::from(self.end_of_episode)
    }
}

/// Everything one tick produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub command: ActuatorCommand,
    pub report: TelemetryReport,
    /// Stuck diagnostic for an external recovery component
    pub stuck: bool,
}
