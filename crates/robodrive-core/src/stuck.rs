//! Stuck-Vehicle Detection
//!
//! This module flags a car that sits slow, far off the centre line and turned
//! away from the track for a sustained number of ticks. It only detects;
//! recovery is left to an external component.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_non_negative};

/// Stuck detector tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StuckConfig {
    /// Heading error in degrees above which the car may count as stuck
    pub max_angle_deg: f64,
    /// Longitudinal speed in m/s below which the car may count as stuck
    pub max_speed: f64,
    /// Distance from the track middle in metres beyond which the car may count as stuck
    pub min_distance: f64,
    /// Consecutive qualifying ticks that must be exceeded before reporting
    pub min_ticks: u32,
}

impl StuckConfig {
    pub const DEFAULT_MAX_ANGLE_DEG: f64 = 20.0;
    pub const DEFAULT_MAX_SPEED: f64 = 5.0;
    pub const DEFAULT_MIN_DISTANCE: f64 = 3.0;
    pub const DEFAULT_MIN_TICKS: u32 = 250;

    pub fn max_angle_rad(&self) -> f64 {
        self.max_angle_deg.to_radians()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("stuck.max_angle_deg", self.max_angle_deg)?;
        ensure_non_negative("stuck.max_speed", self.max_speed)?;
        ensure_non_negative("stuck.min_distance", self.min_distance)
    }
}

impl Default for StuckConfig {
    fn default() -> Self {
        Self {
            max_angle_deg: Self::DEFAULT_MAX_ANGLE_DEG,
            max_speed: Self::DEFAULT_MAX_SPEED,
            min_distance: Self::DEFAULT_MIN_DISTANCE,
            min_ticks: Self::DEFAULT_MIN_TICKS,
        }
    }
}

/// State for the stuck detector.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StuckDetector {
    config: StuckConfig,
    max_angle_rad: f64,
    counter: u32,
}

impl StuckDetector {
    /// Create a new stuck detector.
    ///
    /// # Example
    ///
    /// ```
    /// use robodrive_core::stuck::{StuckConfig, StuckDetector};
    ///
    /// let detector = StuckDetector::new(StuckConfig::default());
    /// assert_eq!(detector.counter(), 0);
    /// ```
    pub fn new(config: StuckConfig) -> Self {
        Self {
            config,
            max_angle_rad: config.max_angle_rad(),
            counter: 0,
        }
    }

    /// Consecutive qualifying ticks seen so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Whether the pose alone qualifies as a stuck candidate.
    pub fn qualifies(&self, angle: f64, speed_x: f64, to_middle: f64) -> bool {
        angle.abs() > self.max_angle_rad
            && speed_x < self.config.max_speed
            && to_middle.abs() > self.config.min_distance
    }

    /// Advance the detector by one tick.
    ///
    /// `angle` is the normalised heading error, `speed_x` the signed
    /// longitudinal speed and `to_middle` the signed distance to the track
    /// middle. Returns `true` once the counter has passed the threshold and the
    /// car points toward its nearer edge; the counter is then held.
    pub fn update(&mut self, angle: f64, speed_x: f64, to_middle: f64) -> bool {
        if !self.qualifies(angle, speed_x, to_middle) {
            self.counter = 0;
            return false;
        }

        if self.counter > self.config.min_ticks && to_middle * angle < 0.0 {
            return true;
        }

        self.counter = self.counter.saturating_add(1);
        false
    }
}

impl Default for StuckDetector {
    fn default() -> Self {
        Self::new(StuckConfig::default())
    }
}
