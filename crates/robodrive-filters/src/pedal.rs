//! Pedal Rise Limiter
//!
//! This module limits how fast brake and throttle may be applied. Releases
//! always pass through unchanged, and the whole limiter is bypassed during the
//! startup grace period of a race.

use serde::{Deserialize, Serialize};

use crate::ControlFrame;

/// Pedal smoother tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PedalConfig {
    /// Race time in seconds during which pedals pass through unmodified
    pub grace_period_s: f64,
    /// Largest allowed increase of a pedal value in one tick
    pub max_increase_per_tick: f64,
}

impl PedalConfig {
    /// Reference grace period.
    pub const DEFAULT_GRACE_PERIOD_S: f64 = 1.0;
    /// Reference per-tick increase limit.
    pub const DEFAULT_MAX_INCREASE: f64 = 0.2;
}

impl Default for PedalConfig {
    fn default() -> Self {
        Self {
            grace_period_s: Self::DEFAULT_GRACE_PERIOD_S,
            max_increase_per_tick: Self::DEFAULT_MAX_INCREASE,
        }
    }
}

/// Single-channel limiter that bounds increases only.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RiseLimiter {
    /// Maximum increase per tick
    pub max_increase: f64,
    /// Previous output value
    pub prev_output: f64,
}

impl RiseLimiter {
    /// Create a limiter with the given per-tick increase bound.
    pub fn new(max_increase: f64) -> Self {
        Self {
            max_increase,
            prev_output: 0.0,
        }
    }

    /// Apply the limiter and remember the result.
    ///
    /// ```
    /// use robodrive_filters::RiseLimiter;
    ///
    /// let mut limiter = RiseLimiter::new(0.2);
    /// assert!((limiter.limit(1.0) - 0.2).abs() < 1e-12);
    /// assert!((limiter.limit(0.0) - 0.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn limit(&mut self, value: f64) -> f64 {
        let ceiling = self.prev_output + self.max_increase;
        let output = if value > ceiling { ceiling } else { value };
        self.prev_output = output;
        output
    }

    /// Remember a value without limiting it.
    #[inline]
    pub fn pass(&mut self, value: f64) -> f64 {
        self.prev_output = value;
        value
    }
}

/// State for the brake/throttle smoother.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PedalState {
    /// Grace period in seconds from race start
    pub grace_period_s: f64,
    /// Brake channel
    pub brake: RiseLimiter,
    /// Throttle channel
    pub accel: RiseLimiter,
}

impl PedalState {
    /// Create a new pedal smoother state.
    ///
    /// # Arguments
    ///
    /// * `grace_period_s` - Race time before limiting starts
    /// * `max_increase` - Largest increase per tick after the grace period
    pub fn new(grace_period_s: f64, max_increase: f64) -> Self {
        Self {
            grace_period_s,
            brake: RiseLimiter::new(max_increase),
            accel: RiseLimiter::new(max_increase),
        }
    }

    /// Create a state from its configuration section.
    pub fn from_config(config: &PedalConfig) -> Self {
        Self::new(config.grace_period_s, config.max_increase_per_tick)
    }

    /// Whether limiting is active at the given race time.
    #[inline]
    pub fn is_limiting(&self, race_time: f64) -> bool {
        race_time > self.grace_period_s
    }
}

impl Default for PedalState {
    fn default() -> Self {
        Self::from_config(&PedalConfig::default())
    }
}

/// Pedal smoother - bounds brake and throttle application.
///
/// While `race_time` is within the grace period the intentions are copied to
/// the outputs; the limiter memory still tracks them so the first limited
/// tick starts from the last real value.
///
/// # Example
///
/// ```
/// use robodrive_filters::prelude::*;
///
/// let mut state = PedalState::default();
/// let mut frame = ControlFrame::from_intention(0.0, 0.0, 1.0).with_context(0.0, 0.02, 0.5);
///
/// pedal_filter(&mut frame, &mut state);
/// assert!((frame.brake_out - 1.0).abs() < 1e-12); // grace period
/// ```
#[inline]
pub fn pedal_filter(frame: &mut ControlFrame, state: &mut PedalState) {
    if state.is_limiting(frame.race_time) {
        frame.brake_out = state.brake.limit(frame.brake_in);
        frame.accel_out = state.accel.limit(frame.accel_in);
    } else {
        frame.brake_out = state.brake.pass(frame.brake_in);
        frame.accel_out = state.accel.pass(frame.accel_in);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(accel: f64, brake: f64, race_time: f64) -> ControlFrame {
        ControlFrame::from_intention(0.0, accel, brake).with_context(0.0, 0.02, race_time)
    }

    #[test]
    fn test_grace_period_passes_through() {
        let mut state = PedalState::default();
        let mut f = frame(1.0, 0.8, 1.0);
        pedal_filter(&mut f, &mut state);

        assert!((f.accel_out - 1.0).abs() < f64::EPSILON);
        assert!((f.brake_out - 0.8).abs() < f64::EPSILON);
        assert!((state.accel.prev_output - 1.0).abs() < f64::EPSILON);
        assert!((state.brake.prev_output - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_increase_clamped_after_grace() {
        let mut state = PedalState::default();
        let mut f = frame(0.0, 0.9, 1.5);
        pedal_filter(&mut f, &mut state);
        assert!((f.brake_out - 0.2).abs() < 1e-12);

        pedal_filter(&mut f, &mut state);
        assert!((f.brake_out - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_small_increase_not_clamped() {
        let mut state = PedalState::default();
        state.accel.prev_output = 0.5;
        let mut f = frame(0.65, 0.0, 5.0);
        pedal_filter(&mut f, &mut state);
        assert!((f.accel_out - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_release_never_clamped() {
        let mut state = PedalState::default();
        state.brake.prev_output = 1.0;
        let mut f = frame(0.0, 0.0, 5.0);
        pedal_filter(&mut f, &mut state);
        assert!(f.brake_out.abs() < f64::EPSILON);
        assert!(state.brake.prev_output.abs() < f64::EPSILON);
    }

    #[test]
    fn test_grace_memory_seeds_first_limited_tick() {
        let mut state = PedalState::default();
        let mut f = frame(0.7, 0.0, 0.9);
        pedal_filter(&mut f, &mut state);

        let mut f = frame(1.0, 0.0, 1.1);
        pedal_filter(&mut f, &mut state);
        assert!((f.accel_out - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut state = PedalState::default();
        state.brake.prev_output = 0.6;
        let mut f = frame(1.0, 1.0, 2.0);
        pedal_filter(&mut f, &mut state);
        assert!((f.accel_out - 0.2).abs() < 1e-12);
        assert!((f.brake_out - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_is_limiting_boundary() {
        let state = PedalState::default();
        assert!(!state.is_limiting(1.0));
        assert!(state.is_limiting(1.000_001));
    }
}
