//! Clutch slip model
//!
//! After every actual gear change the clutch is held open for a short time
//! that shrinks with the gear number, then released linearly over the
//! following ticks.

use serde::{Deserialize, Serialize};

use crate::{GearCommand, TransmissionError, TransmissionResult, ensure_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClutchConfig {
    /// Slip time in seconds before the per-gear reduction
    pub base_time_s: f64,
    /// Each gear number shortens the slip time by `1 / gear_divisor` seconds
    pub gear_divisor: f64,
    /// Clutch command per second of remaining slip time
    pub gain: f64,
    /// Clamp the command into `[0, 1]`
    pub clamp_output: bool,
}

impl ClutchConfig {
    pub const DEFAULT_BASE_TIME_S: f64 = 0.332;
    pub const DEFAULT_GEAR_DIVISOR: f64 = 65.0;
    pub const DEFAULT_GAIN: f64 = 2.0;

    pub fn validate(&self) -> TransmissionResult<()> {
        ensure_non_negative("clutch.base_time_s", self.base_time_s)?;
        ensure_non_negative("clutch.gain", self.gain)?;
        if !(self.gear_divisor.is_finite() && self.gear_divisor > 0.0) {
            return Err(TransmissionError::InvalidParameter {
                field: "clutch.gear_divisor",
                reason: format!("must be positive and finite, got {}", self.gear_divisor),
            });
        }
        Ok(())
    }
}

impl Default for ClutchConfig {
    fn default() -> Self {
        Self {
            base_time_s: Self::DEFAULT_BASE_TIME_S,
            gear_divisor: Self::DEFAULT_GEAR_DIVISOR,
            gain: Self::DEFAULT_GAIN,
            clamp_output: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClutchModel {
    config: ClutchConfig,
    timer: f64,
}

impl ClutchModel {
    pub fn new(config: ClutchConfig) -> Self {
        Self { config, timer: 0.0 }
    }

    /// Remaining slip time in seconds.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Slip time restored when `gear` is newly engaged.
    pub fn slip_time(&self, gear: GearCommand) -> f64 {
        self.config.base_time_s - f64::from(gear.get()) / self.config.gear_divisor
    }

    /// Clutch command for this tick.
    ///
    /// `current` is the gear the car is in, `commanded` the gear requested
    /// this tick. Neutral and commands at or above `gear_count` release the
    /// clutch without touching the timer. A non-finite `dt` holds the timer.
    pub fn update(&mut self, current: GearCommand, commanded: GearCommand, gear_count: i32, dt: f64) -> f64 {
        if commanded.is_neutral() || commanded.get() >= gear_count {
            return 0.0;
        }

        if commanded != current {
            self.timer = self.slip_time(commanded);
        }

        if self.timer > 0.0 && dt.is_finite() {
            self.timer -= dt;
        }

        let command = self.config.gain * self.timer;
        if self.config.clamp_output {
            command.clamp(0.0, 1.0)
        } else {
            command
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.02;
    const GEAR_COUNT: i32 = 8;

    #[test]
    fn test_gear_change_resets_timer() {
        let mut clutch = ClutchModel::default();
        let out = clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, DT);

        let expected_timer = 0.332 - 2.0 / 65.0 - DT;
        assert!((clutch.timer() - expected_timer).abs() < 1e-12);
        assert!((out - 2.0 * expected_timer).abs() < 1e-12);
    }

    #[test]
    fn test_timer_decays_without_gear_change() {
        let mut clutch = ClutchModel::default();
        clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, DT);
        let before = clutch.timer();

        clutch.update(GearCommand::new(2), GearCommand::new(2), GEAR_COUNT, DT);
        assert!((clutch.timer() - (before - DT)).abs() < 1e-12);
    }

    #[test]
    fn test_timer_stops_once_expired() {
        let mut clutch = ClutchModel::default();
        clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, DT);
        for _ in 0..100 {
            clutch.update(GearCommand::new(2), GearCommand::new(2), GEAR_COUNT, DT);
        }
        assert!(clutch.timer() <= 0.0);
        assert!(clutch.timer() > -DT);
    }

    #[test]
    fn test_non_finite_dt_holds_timer() {
        let mut clutch = ClutchModel::default();
        let slip = clutch.slip_time(GearCommand::new(2));

        let out = clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, f64::NAN);
        assert!(out.is_finite());
        assert!((clutch.timer() - slip).abs() < 1e-12);

        clutch.update(GearCommand::new(2), GearCommand::new(2), GEAR_COUNT, f64::INFINITY);
        assert!((clutch.timer() - slip).abs() < 1e-12);

        let out = clutch.update(GearCommand::new(2), GearCommand::new(2), GEAR_COUNT, DT);
        assert!((clutch.timer() - (slip - DT)).abs() < 1e-12);
        assert!((out - 2.0 * (slip - DT)).abs() < 1e-12);
    }

    #[test]
    fn test_command_past_top_gear_keeps_slipping() {
        let mut clutch = ClutchModel::default();
        let top = GearCommand::new(6);
        let beyond = GearCommand::new(7);
        let slip = clutch.slip_time(beyond);

        // The car never reaches the commanded gear, so every tick is a change.
        for _ in 0..50 {
            let out = clutch.update(top, beyond, GEAR_COUNT, DT);
            assert!((clutch.timer() - (slip - DT)).abs() < 1e-12);
            assert!((out - 2.0 * (slip - DT)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_low_gears_slip_longer() {
        let clutch = ClutchModel::default();
        assert!(clutch.slip_time(GearCommand::FIRST) > clutch.slip_time(GearCommand::new(5)));
    }

    #[test]
    fn test_neutral_releases_without_touching_timer() {
        let mut clutch = ClutchModel::default();
        clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, DT);
        let timer = clutch.timer();

        let out = clutch.update(GearCommand::new(2), GearCommand::NEUTRAL, GEAR_COUNT, DT);
        assert!(out.abs() < f64::EPSILON);
        assert!((clutch.timer() - timer).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gear_at_count_limit_releases() {
        let mut clutch = ClutchModel::default();
        let out = clutch.update(GearCommand::new(7), GearCommand::new(8), GEAR_COUNT, DT);
        assert!(out.abs() < f64::EPSILON);
        assert!(clutch.timer().abs() < f64::EPSILON);
    }

    #[test]
    fn test_reverse_engagement_slips() {
        let mut clutch = ClutchModel::default();
        let out = clutch.update(GearCommand::FIRST, GearCommand::REVERSE, GEAR_COUNT, DT);
        let expected = 2.0 * (0.332 + 1.0 / 65.0 - DT);
        assert!((out - expected).abs() < 1e-12);
    }

    #[test]
    fn test_high_gear_goes_negative_unclamped() {
        let mut clutch = ClutchModel::default();
        let out = clutch.update(GearCommand::new(24), GearCommand::new(25), 30, DT);
        assert!(out < 0.0);
    }

    #[test]
    fn test_clamped_output_stays_in_unit_range() {
        let mut clutch = ClutchModel::new(ClutchConfig {
            clamp_output: true,
            ..ClutchConfig::default()
        });
        let out = clutch.update(GearCommand::new(24), GearCommand::new(25), 30, DT);
        assert!(out.abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_clears_timer() {
        let mut clutch = ClutchModel::default();
        clutch.update(GearCommand::FIRST, GearCommand::new(2), GEAR_COUNT, DT);
        clutch.reset();
        assert!(clutch.timer().abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_validation() {
        assert!(ClutchConfig::default().validate().is_ok());
        let config = ClutchConfig {
            gear_divisor: 0.0,
            ..ClutchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
