//! Automatic transmission for the robodrive actuation controller
//!
//! This crate decides gear commands from speed and gearbox data, toggles the
//! forward/reverse mode from the pedals, and models clutch slip after a gear
//! change. Everything here is pure per-tick arithmetic; the caller owns the
//! state and decides when to reset it.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod clutch;
pub mod reverse;
pub mod shift;
pub mod types;

pub use clutch::{ClutchConfig, ClutchModel};
pub use reverse::{AutoReverseController, DriveMode, ReverseConfig, ReverseOutput, ReverseTransition};
pub use shift::{ShiftConfig, ShiftDecision, ShiftKind, TransmissionController};
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransmissionError {
    #[error("Gear ratio table is empty")]
    EmptyRatioTable,

    #[error("Gear ratio at index {index} is not finite: {value}")]
    InvalidRatio { index: usize, value: f64 },

    #[error("Redline must be positive and finite, got {0}")]
    InvalidRedline(f64),

    #[error("Wheel radius must be positive and finite, got {0}")]
    InvalidWheelRadius(f64),

    #[error("Gear offset {0} does not map neutral into the ratio table")]
    InvalidOffset(i32),

    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

pub type TransmissionResult<T> = Result<T, TransmissionError>;

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> TransmissionResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TransmissionError::InvalidParameter {
            field,
            reason: format!("must be finite and non-negative, got {value}"),
        })
    }
}
