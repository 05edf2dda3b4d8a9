//! Error types for controller construction and the intention/telemetry bus.
//!
//! The per-tick control path never fails; these errors only surface when a
//! controller is built from configuration or when a bus endpoint goes away.

use robodrive_transmission::TransmissionError;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric parameter is outside its allowed range
    #[error("Invalid {field}: {reason}")]
    InvalidParameter {
        /// Dotted field path
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Gearbox-related parameter rejected by the transmission crate
    #[error("Transmission config: {0}")]
    Transmission(#[from] TransmissionError),
}

/// Intention/telemetry exchange errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The intention source hung up with nothing pending
    #[error("Intention source disconnected")]
    SourceDisconnected,

    /// The telemetry consumer hung up
    #[error("Telemetry sink disconnected")]
    SinkDisconnected,

    /// The controller end of a channel bus was dropped
    #[error("Controller disconnected")]
    ControllerDisconnected,
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            field,
            reason: format!("must be finite and non-negative, got {value}"),
        })
    }
}
