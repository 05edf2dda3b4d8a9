//! Per-tick actuation filters for robodrive
//!
//! This crate provides the rate limiters that turn raw driving intentions into
//! actuator-friendly values. Every filter runs once per fixed simulation tick.
//!
//! # Overview
//!
//! - **Steering**: two independent slew integrators (left/right) whose gain
//!   drops as ground speed rises
//! - **Pedals**: rise-only limiters for brake and throttle, bypassed during
//!   the startup grace period
//!
//! # RT Safety
//!
//! - No heap allocations in filter hot paths
//! - O(1) time complexity for all operations
//! - No syscalls or I/O in filter functions
//!
//! # Example
//!
//! ```
//! use robodrive_filters::prelude::*;
//!
//! let mut steering = SteeringState::default();
//! let mut pedals = PedalState::default();
//!
//! let mut frame = ControlFrame::from_intention(1.0, 0.5, 0.0);
//! frame.dt = 0.02;
//! frame.race_time = 2.0;
//!
//! steering_filter(&mut frame, &mut steering);
//! pedal_filter(&mut frame, &mut pedals);
//!
//! assert!(frame.steer_out > 0.0);
//! assert!((frame.accel_out - 0.2).abs() < 1e-12);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod pedal;
pub mod prelude;
pub mod state;
pub mod steering;

pub use pedal::{PedalConfig, PedalState, RiseLimiter, pedal_filter};
pub use state::FilterState;
pub use steering::{SteeringConfig, SteeringState, steering_filter};

/// Per-tick control frame shared by the filters.
///
/// The orchestrator fills the `*_in` fields and the vehicle context, runs the
/// filters in order, and reads back the `*_out` fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    /// Steering intention (-1.0 right to 1.0 left)
    pub steer_in: f64,
    /// Throttle intention (0.0 to 1.0)
    pub accel_in: f64,
    /// Brake intention (0.0 to 1.0)
    pub brake_in: f64,
    /// Smoothed steering output (-1.0 to 1.0)
    pub steer_out: f64,
    /// Rate-limited throttle output
    pub accel_out: f64,
    /// Rate-limited brake output
    pub brake_out: f64,
    /// Ground speed magnitude in m/s
    pub speed: f64,
    /// Tick length in seconds
    pub dt: f64,
    /// Elapsed race time in seconds
    pub race_time: f64,
}

impl ControlFrame {
    /// Create a frame carrying only intentions; the vehicle context is zeroed.
    pub fn from_intention(steer: f64, accel: f64, brake: f64) -> Self {
        Self {
            steer_in: steer,
            accel_in: accel,
            brake_in: brake,
            ..Self::default()
        }
    }

    /// Builder-style setter for the vehicle context.
    pub fn with_context(mut self, speed: f64, dt: f64, race_time: f64) -> Self {
        self.speed = speed;
        self.dt = dt;
        self.race_time = race_time;
        self
    }
}
