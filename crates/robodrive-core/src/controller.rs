//! Per-vehicle tick orchestration.
//!
//! [`VehicleController`] owns every piece of per-race state for one car and
//! runs the fixed pipeline once per tick:
//!
//! 1. steering smoother
//! 2. pedal smoother
//! 3. gear selection (skipped while reversing)
//! 4. auto-reverse toggle
//! 5. clutch slip
//! 6. stuck detection
//!
//! The tick itself never fails. Errors only surface when building the
//! controller from configuration or when a bus endpoint disconnects.

use robodrive_filters::{ControlFrame, FilterState, PedalState, SteeringState, pedal_filter, steering_filter};
use robodrive_transmission::{
    AutoReverseController, ClutchModel, ReverseTransition, ShiftKind, TransmissionController,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::bus::{IntentionSource, TelemetrySink};
use crate::command::{ActuatorCommand, TelemetryReport, TickOutput};
use crate::config::ControllerConfig;
use crate::error::{BusError, ConfigError};
use crate::intention::RawIntention;
use crate::stats::ControllerStats;
use crate::stuck::StuckDetector;
use crate::telemetry::VehicleTelemetry;

/// Read-only view of the state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControllerState {
    pub left_steer_level: f64,
    pub right_steer_level: f64,
    pub smoothed_brake: f64,
    pub smoothed_accel: f64,
    pub clutch_timer: f64,
    pub auto_reverse_engaged: bool,
    pub stuck_counter: u32,
}

/// Actuation controller for a single vehicle.
#[derive(Debug, Clone)]
pub struct VehicleController {
    config: ControllerConfig,
    steering: SteeringState,
    pedals: PedalState,
    transmission: TransmissionController,
    reverse: AutoReverseController,
    clutch: ClutchModel,
    stuck: StuckDetector,
    stats: ControllerStats,
    stuck_reported: bool,
}

impl VehicleController {
    /// Build a controller after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any section holds an out-of-range value.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Controller with the reference tuning.
    pub fn with_defaults() -> Self {
        Self::from_valid_config(ControllerConfig::default())
    }

    fn from_valid_config(config: ControllerConfig) -> Self {
        Self {
            steering: SteeringState::from_config(&config.steering),
            pedals: PedalState::from_config(&config.pedals),
            transmission: TransmissionController::new(config.shift),
            reverse: AutoReverseController::new(config.reverse),
            clutch: ClutchModel::new(config.clutch),
            stuck: StuckDetector::new(config.stuck),
            stats: ControllerStats::default(),
            stuck_reported: false,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn stats(&self) -> &ControllerStats {
        &self.stats
    }

    pub fn state(&self) -> ControllerState {
        ControllerState {
            left_steer_level: self.steering.left_level,
            right_steer_level: self.steering.right_level,
            smoothed_brake: self.pedals.brake.prev_output,
            smoothed_accel: self.pedals.accel.prev_output,
            clutch_timer: self.clutch.timer(),
            auto_reverse_engaged: self.reverse.is_engaged(),
            stuck_counter: self.stuck.counter(),
        }
    }

    /// Reinitialise all per-race state.
    pub fn on_race_start(&mut self) {
        info!("Race start, resetting controller state");
        self.steering.reset();
        self.pedals.reset();
        self.reverse.reset();
        self.clutch.reset();
        self.stuck.reset();
        self.stats.reset();
        self.stuck_reported = false;
    }

    pub fn on_track_change(&mut self, track: &str) {
        info!(track, "Track changed");
    }

    pub fn on_race_end(&mut self) {
        info!(
            ticks = self.stats.ticks,
            upshifts = self.stats.upshifts,
            downshifts = self.stats.downshifts,
            reverse_engagements = self.stats.reverse_engagements,
            stuck_percent = self.stats.stuck_percent(),
            "Race end"
        );
    }

    /// Run one control tick.
    pub fn tick(&mut self, intention: &RawIntention, vehicle: &VehicleTelemetry) -> TickOutput {
        let intention = intention.sanitized();
        let mut frame = ControlFrame::from_intention(intention.steer, intention.accel, intention.brake)
            .with_context(vehicle.speed, vehicle.dt, vehicle.race_time);

        steering_filter(&mut frame, &mut self.steering);
        pedal_filter(&mut frame, &mut self.pedals);

        let mut gear = vehicle.gear;
        if !self.reverse.is_engaged() {
            let decision = self.transmission.select(&vehicle.gearbox, vehicle.gear, vehicle.speed);
            match decision.kind {
                ShiftKind::Upshift => {
                    self.stats.upshifts = self.stats.upshifts.saturating_add(1);
                    debug!(from = %vehicle.gear, to = %decision.gear, speed = vehicle.speed, "Upshift");
                }
                ShiftKind::Downshift => {
                    self.stats.downshifts = self.stats.downshifts.saturating_add(1);
                    debug!(from = %vehicle.gear, to = %decision.gear, speed = vehicle.speed, "Downshift");
                }
                ShiftKind::Engage => {
                    debug!(from = %vehicle.gear, "Engaging first gear");
                }
                ShiftKind::Hold => {}
            }
            gear = decision.gear;
        }

        let reversed = self
            .reverse
            .update(frame.brake_out, frame.accel_out, vehicle.speed_x, gear);
        match reversed.transition {
            ReverseTransition::Engaged => {
                self.stats.reverse_engagements = self.stats.reverse_engagements.saturating_add(1);
                debug!(speed_x = vehicle.speed_x, "Reverse engaged");
            }
            ReverseTransition::Released => {
                self.stats.reverse_releases = self.stats.reverse_releases.saturating_add(1);
                debug!(speed_x = vehicle.speed_x, "Reverse released");
            }
            ReverseTransition::None | ReverseTransition::Held => {}
        }

        let clutch = self.clutch.update(
            vehicle.gear,
            reversed.gear,
            vehicle.gearbox.gear_count,
            vehicle.dt,
        );

        let angle = vehicle.heading_error();
        let stuck = self.stuck.update(angle, vehicle.speed_x, vehicle.to_middle);
        if stuck {
            self.stats.stuck_ticks = self.stats.stuck_ticks.saturating_add(1);
            if !self.stuck_reported {
                warn!(
                    angle,
                    speed_x = vehicle.speed_x,
                    to_middle = vehicle.to_middle,
                    race_time = vehicle.race_time,
                    "Vehicle stuck"
                );
            }
        }
        self.stuck_reported = stuck;
        self.stats.ticks = self.stats.ticks.saturating_add(1);

        let command = ActuatorCommand {
            steer: frame.steer_out,
            gear: reversed.gear,
            clutch,
            brake: reversed.brake,
            accel: reversed.accel,
        };
        let report = TelemetryReport {
            speed: vehicle.speed_x,
            angle,
            damage: vehicle.damage,
            track_position: vehicle.to_middle,
            end_of_episode: vehicle.status.is_terminal(),
        };

        trace!(
            steer = command.steer,
            gear = %command.gear,
            clutch = command.clutch,
            brake = command.brake,
            accel = command.accel,
            "Tick"
        );

        TickOutput { command, report, stuck }
    }

    /// Read the intention from `bus`, tick, and publish the report.
    ///
    /// The report is published only once the command is final.
    ///
    /// # Errors
    ///
    /// Returns [`BusError`] if either side of the bus has disconnected.
    pub fn step<B>(&mut self, bus: &mut B, vehicle: &VehicleTelemetry) -> Result<TickOutput, BusError>
    where
        B: IntentionSource + TelemetrySink,
    {
        let intention = bus.read_intention()?;
        let output = self.tick(&intention, vehicle);
        bus.publish(&output.report)?;
        Ok(output)
    }
}

impl Default for VehicleController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
