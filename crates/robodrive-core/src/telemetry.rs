//! Vehicle telemetry read each tick and the heading helpers built on it.

use std::f64::consts::{PI, TAU};

use robodrive_transmission::{GearCommand, Gearbox};
use serde::{Deserialize, Serialize};

/// Race state flags reported by the simulator for one car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleStatus {
    pub eliminated: bool,
    pub broken: bool,
    pub out_of_gas: bool,
    pub finished: bool,
}

impl VehicleStatus {
    pub fn running() -> Self {
        Self::default()
    }

    /// True when any flag ends the episode for this car.
    pub fn is_terminal(&self) -> bool {
        self.eliminated || self.broken || self.out_of_gas || self.finished
    }
}

/// Read-only vehicle and track state for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTelemetry {
    /// Signed longitudinal speed in m/s
    pub speed_x: f64,
    /// Ground speed magnitude in m/s
    pub speed: f64,
    /// Yaw in radians
    pub yaw: f64,
    /// Track-side tangent angle at the car position in radians
    pub track_tangent: f64,
    /// Signed lateral distance to the track middle in metres
    pub to_middle: f64,
    /// Gear the car is currently in
    pub gear: GearCommand,
    pub gearbox: Gearbox,
    pub damage: i32,
    #[serde(default)]
    pub status: VehicleStatus,
    /// Elapsed race time in seconds
    pub race_time: f64,
    /// Fixed tick length in seconds
    pub dt: f64,
}

impl VehicleTelemetry {
    /// Car standing still on the centre line in first gear at race start.
    pub fn at_rest(gearbox: Gearbox, dt: f64) -> Self {
        Self {
            speed_x: 0.0,
            speed: 0.0,
            yaw: 0.0,
            track_tangent: 0.0,
            to_middle: 0.0,
            gear: GearCommand::FIRST,
            gearbox,
            damage: 0,
            status: VehicleStatus::running(),
            race_time: 0.0,
            dt,
        }
    }

    /// Set both the signed and the magnitude speed from one value.
    pub fn with_speed(mut self, speed_x: f64) -> Self {
        self.speed_x = speed_x;
        self.speed = speed_x.abs();
        self
    }

    /// Heading error against the track tangent, in `(-π, π]`.
    pub fn heading_error(&self) -> f64 {
        normalize_angle(self.track_tangent - self.yaw)
    }
}

/// Wrap an angle into `(-π, π]`. Non-finite input is returned unchanged.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
