//! Automatic shift logic
//!
//! Shift points come from the redline road speed of each gear. Upshift happens
//! above the current gear's point; downshift only once speed falls a fixed
//! margin below the lower gear's point, which keeps the box from hunting
//! around a single shift speed.

use serde::{Deserialize, Serialize};

use crate::{GearCommand, Gearbox, TransmissionResult, ensure_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShiftConfig {
    /// Fraction of the redline at which to upshift
    pub redline_fraction: f64,
    /// Hysteresis between up- and downshift points in m/s
    pub downshift_margin: f64,
}

impl ShiftConfig {
    pub const DEFAULT_REDLINE_FRACTION: f64 = 0.95;
    pub const DEFAULT_DOWNSHIFT_MARGIN: f64 = 4.0;

    pub fn validate(&self) -> TransmissionResult<()> {
        ensure_non_negative("shift.redline_fraction", self.redline_fraction)?;
        ensure_non_negative("shift.downshift_margin", self.downshift_margin)
    }
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            redline_fraction: Self::DEFAULT_REDLINE_FRACTION,
            downshift_margin: Self::DEFAULT_DOWNSHIFT_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Hold,
    Upshift,
    Downshift,
    /// Lifted out of neutral or reverse into first gear
    Engage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftDecision {
    pub gear: GearCommand,
    pub kind: ShiftKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransmissionController {
    config: ShiftConfig,
}

impl TransmissionController {
    pub fn new(config: ShiftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShiftConfig {
        &self.config
    }

    /// Wheel-surface speed at the shift fraction of the redline, before the
    /// gear ratio is applied.
    #[inline]
    pub fn omega(&self, gearbox: &Gearbox) -> f64 {
        gearbox.redline * gearbox.wheel_radius * self.config.redline_fraction
    }

    /// Speed above which `gear` shifts up.
    ///
    /// `None` means no constraint: the gear has no usable ratio, so upshift is
    /// disabled there rather than dividing by zero.
    pub fn upshift_threshold(&self, gearbox: &Gearbox, gear: GearCommand) -> Option<f64> {
        gearbox.ratio(gear).map(|ratio| self.omega(gearbox) / ratio)
    }

    /// Speed below which `gear` shifts down.
    ///
    /// `None` at or below first gear, and when the lower gear has no usable
    /// ratio.
    pub fn downshift_threshold(&self, gearbox: &Gearbox, gear: GearCommand) -> Option<f64> {
        if gear <= GearCommand::FIRST {
            return None;
        }
        gearbox
            .ratio(gear.down())
            .map(|ratio| self.omega(gearbox) / ratio - self.config.downshift_margin)
    }

    /// Pick the gear command for this tick.
    ///
    /// The result is never below first gear. There is no ceiling: above the
    /// top gear's shift point the command is `top + 1`, one past the ratio
    /// table. The gearbox never engages it, so the car stays in top gear while
    /// the clutch keeps seeing a pending change and holds its slip.
    pub fn select(&self, gearbox: &Gearbox, gear: GearCommand, speed: f64) -> ShiftDecision {
        let upshift = self
            .upshift_threshold(gearbox, gear)
            .is_some_and(|threshold| speed > threshold);
        if upshift {
            return Self::floor(gear.up(), ShiftKind::Upshift);
        }

        let downshift = self
            .downshift_threshold(gearbox, gear)
            .is_some_and(|threshold| speed < threshold);
        if downshift {
            return Self::floor(gear.down(), ShiftKind::Downshift);
        }

        Self::floor(gear, ShiftKind::Hold)
    }

    fn floor(gear: GearCommand, kind: ShiftKind) -> ShiftDecision {
        if gear < GearCommand::FIRST {
            ShiftDecision {
                gear: GearCommand::FIRST,
                kind: ShiftKind::Engage,
            }
        } else {
            ShiftDecision { gear, kind }
        }
    }
}
