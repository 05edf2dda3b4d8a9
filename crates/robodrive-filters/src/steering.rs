//! Progressive Steering Smoother
//!
//! This module turns a raw steering intention into a continuous actuator value
//! with a finite slew rate. Left and right turning are integrated by two
//! independent levels so a direction flip has to unwind one level before the
//! other takes over.

use serde::{Deserialize, Serialize};

use crate::ControlFrame;

/// Steering smoother tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteeringConfig {
    /// Level change per second of requested steering at standstill
    pub rate: f64,
    /// Speed (m/s) over which the gain attenuation is expressed
    pub speed_scale: f64,
}

impl SteeringConfig {
    /// Reference slew rate.
    pub const DEFAULT_RATE: f64 = 0.007;
    /// Reference speed scale.
    pub const DEFAULT_SPEED_SCALE: f64 = 10.0;
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            rate: Self::DEFAULT_RATE,
            speed_scale: Self::DEFAULT_SPEED_SCALE,
        }
    }
}

/// State for the steering smoother.
///
/// `left_level` lives in `[0, 1]` and `right_level` in `[-1, 0]`; the
/// steering output is always their sum.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringState {
    /// Slew rate per second at standstill
    pub rate: f64,
    /// Speed scale for the gain attenuation
    pub speed_scale: f64,
    /// Activation of the left turning direction
    pub left_level: f64,
    /// Activation of the right turning direction
    pub right_level: f64,
}

impl SteeringState {
    /// Create a new steering smoother state.
    ///
    /// # Arguments
    ///
    /// * `rate` - Level change per second at standstill
    /// * `speed_scale` - Speed in m/s used to attenuate the rate
    ///
    /// # Example
    ///
    /// ```
    /// use robodrive_filters::SteeringState;
    ///
    /// let state = SteeringState::new(0.007, 10.0);
    /// assert!(state.steer().abs() < f64::EPSILON);
    /// ```
    pub fn new(rate: f64, speed_scale: f64) -> Self {
        Self {
            rate,
            speed_scale,
            left_level: 0.0,
            right_level: 0.0,
        }
    }

    /// Create a state from its configuration section.
    pub fn from_config(config: &SteeringConfig) -> Self {
        Self::new(config.rate, config.speed_scale)
    }

    /// Current steering value (`left_level + right_level`).
    #[inline]
    pub fn steer(&self) -> f64 {
        self.left_level + self.right_level
    }

    /// Level change for one tick at the given speed.
    ///
    /// The gain is `rate·dt / (1 + rate·|speed|/speed_scale)`, so steering
    /// slows down progressively as the car gets faster.
    #[inline]
    pub fn step(&self, speed: f64, dt: f64) -> f64 {
        let attenuation = if self.speed_scale > 0.0 {
            1.0 + self.rate * speed.abs() / self.speed_scale
        } else {
            1.0
        };
        self.rate * dt / attenuation
    }
}

impl Default for SteeringState {
    fn default() -> Self {
        Self::from_config(&SteeringConfig::default())
    }
}

/// Steering smoother - integrates the two direction levels by one tick.
///
/// `steer_in > 0` requests left, `steer_in < 0` requests right; the magnitude
/// of the intention is ignored. A requested level moves toward its active
/// bound, an idle level relaxes toward zero.
///
/// Non-finite speed or tick length leaves the levels untouched.
///
/// # Example
///
/// ```
/// use robodrive_filters::prelude::*;
///
/// let mut state = SteeringState::default();
/// let mut frame = ControlFrame::from_intention(-1.0, 0.0, 0.0).with_context(0.0, 1.0, 0.0);
///
/// steering_filter(&mut frame, &mut state);
/// assert!((frame.steer_out + 0.007).abs() < 1e-12);
/// ```
#[inline]
pub fn steering_filter(frame: &mut ControlFrame, state: &mut SteeringState) {
    let step = state.step(frame.speed, frame.dt);
    if !step.is_finite() {
        frame.steer_out = state.steer();
        return;
    }

    let left_dir = if frame.steer_in > 0.0 { 1.0 } else { -1.0 };
    state.left_level = (state.left_level + left_dir * step).clamp(0.0, 1.0);

    let right_dir = if frame.steer_in < 0.0 { 1.0 } else { -1.0 };
    state.right_level = (state.right_level - right_dir * step).clamp(-1.0, 0.0);

    frame.steer_out = state.steer();
}
