//! Per-tick vehicle actuation controller
//!
//! Turns raw driving intentions (steer, throttle, brake) into actuator
//! commands for one simulated car, once per fixed-length tick. The controller
//! smooths steering and pedals, selects gears, toggles reverse from the
//! pedals, models clutch slip and flags a stuck car for an external recovery
//! component.
//!
//! # Example
//!
//! ```
//! use robodrive_core::{RawIntention, VehicleController, VehicleTelemetry};
//! use robodrive_transmission::{GearCommand, Gearbox};
//!
//! let mut controller = VehicleController::with_defaults();
//! controller.on_race_start();
//!
//! let vehicle = VehicleTelemetry::at_rest(Gearbox::six_speed(), 0.02);
//! let output = controller.tick(&RawIntention::new(0.5, 1.0, 0.0), &vehicle);
//!
//! assert!(output.command.steer > 0.0);
//! assert_eq!(output.command.gear, GearCommand::FIRST);
//! assert!(!output.report.end_of_episode);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod bus;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod intention;
pub mod stats;
pub mod stuck;
pub mod telemetry;

pub use bus::{BusPeer, ChannelBus, IntentionSource, LoopbackBus, TelemetrySink, channel_bus};
pub use command::{ActuatorCommand, TelemetryReport, TickOutput};
pub use config::ControllerConfig;
pub use controller::{ControllerState, VehicleController};
pub use error::{BusError, ConfigError};
pub use intention::RawIntention;
pub use stats::ControllerStats;
pub use stuck::{StuckConfig, StuckDetector};
pub use telemetry::{VehicleStatus, VehicleTelemetry, normalize_angle};
