//! Auto-reverse state machine
//!
//! One brake/throttle pair drives both directions. Braking near standstill
//! engages reverse; from then on the pedals are swapped so the brake pedal
//! propels the car backward, until the (swapped) brake wins again near
//! standstill and the box returns to first gear.

use serde::{Deserialize, Serialize};

use crate::{GearCommand, TransmissionResult, ensure_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReverseConfig {
    /// Longitudinal speed (m/s) below which the mode may toggle
    pub speed_window: f64,
}

impl ReverseConfig {
    pub const DEFAULT_SPEED_WINDOW: f64 = 1.0;

    pub fn validate(&self) -> TransmissionResult<()> {
        ensure_non_negative("reverse.speed_window", self.speed_window)
    }
}

impl Default for ReverseConfig {
    fn default() -> Self {
        Self {
            speed_window: Self::DEFAULT_SPEED_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriveMode {
    #[default]
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReverseTransition {
    /// Forward mode, nothing changed
    None,
    /// Forward to reverse this tick
    Engaged,
    /// Still reversing
    Held,
    /// Reverse to forward this tick
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseOutput {
    pub brake: f64,
    pub accel: f64,
    pub gear: GearCommand,
    pub transition: ReverseTransition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoReverseController {
    config: ReverseConfig,
    mode: DriveMode,
}

impl AutoReverseController {
    pub fn new(config: ReverseConfig) -> Self {
        Self {
            config,
            mode: DriveMode::Forward,
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn is_engaged(&self) -> bool {
        self.mode == DriveMode::Reverse
    }

    pub fn reset(&mut self) {
        self.mode = DriveMode::Forward;
    }

    /// Advance the state machine by one tick.
    ///
    /// `brake`/`accel` are the smoothed pedal commands, `speed_x` the signed
    /// longitudinal speed and `gear` the command chosen so far this tick. The
    /// returned pedals are swapped whenever the tick ends or starts in
    /// reverse.
    pub fn update(&mut self, brake: f64, accel: f64, speed_x: f64, gear: GearCommand) -> ReverseOutput {
        let window = self.config.speed_window;
        match self.mode {
            DriveMode::Forward => {
                if brake > accel && speed_x < window {
                    self.mode = DriveMode::Reverse;
                    ReverseOutput {
                        brake: accel,
                        accel: brake,
                        gear: GearCommand::REVERSE,
                        transition: ReverseTransition::Engaged,
                    }
                } else {
                    ReverseOutput {
                        brake,
                        accel,
                        gear,
                        transition: ReverseTransition::None,
                    }
                }
            }
            DriveMode::Reverse => {
                let (brake, accel) = (accel, brake);
                if brake > accel && speed_x > -window && speed_x < window {
                    self.mode = DriveMode::Forward;
                    ReverseOutput {
                        brake,
                        accel,
                        gear: GearCommand::FIRST,
                        transition: ReverseTransition::Released,
                    }
                } else {
                    ReverseOutput {
                        brake,
                        accel,
                        gear: GearCommand::REVERSE,
                        transition: ReverseTransition::Held,
                    }
                }
            }
        }
    }
}
