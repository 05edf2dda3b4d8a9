//! Raw driving intentions supplied by the upstream policy each tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIntention {
    /// Desired steering, `-1.0` right to `1.0` left
    pub steer: f64,
    /// Desired throttle in `[0, 1]`
    pub accel: f64,
    /// Desired brake in `[0, 1]`
    pub brake: f64,
}

impl RawIntention {
    pub fn new(steer: f64, accel: f64, brake: f64) -> Self {
        Self { steer, accel, brake }
    }

    pub fn coast() -> Self {
        Self::default()
    }

    /// Clamp every field into its range; non-finite values become zero.
    pub fn sanitized(&self) -> Self {
        Self {
            steer: finite_or_zero(self.steer).clamp(-1.0, 1.0),
            accel: finite_or_zero(self.accel).clamp(0.0, 1.0),
            brake: finite_or_zero(self.brake).clamp(0.0, 1.0),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
