//! Filter State Types
//!
//! Shared reset behaviour for the per-vehicle filter states. A race start
//! resets the dynamic part of every state while keeping its tuning.

pub use crate::pedal::{PedalState, RiseLimiter};
pub use crate::steering::SteeringState;

/// Filter trait for common filter operations.
pub trait FilterState: Copy + Clone + std::fmt::Debug {
    /// Reset the filter state to initial values.
    fn reset(&mut self);
}

impl FilterState for SteeringState {
    fn reset(&mut self) {
        self.left_level = 0.0;
        self.right_level = 0.0;
    }
}

impl FilterState for RiseLimiter {
    fn reset(&mut self) {
        self.prev_output = 0.0;
    }
}

impl FilterState for PedalState {
    fn reset(&mut self) {
        self.brake.reset();
        self.accel.reset();
    }
}
