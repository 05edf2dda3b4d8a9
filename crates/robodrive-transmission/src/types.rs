//! Gear and gearbox type definitions

use serde::{Deserialize, Serialize};

use crate::{TransmissionError, TransmissionResult};

/// Gear command expressed relative to neutral: `-1` reverse, `0` neutral,
/// `1..` forward gears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GearCommand(i32);

impl GearCommand {
    pub const REVERSE: Self = Self(-1);
    pub const NEUTRAL: Self = Self(0);
    pub const FIRST: Self = Self(1);

    pub const fn new(gear: i32) -> Self {
        Self(gear)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_reverse(self) -> bool {
        self.0 < 0
    }

    pub const fn is_neutral(self) -> bool {
        self.0 == 0
    }

    pub const fn is_forward(self) -> bool {
        self.0 > 0
    }

    pub fn up(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<i32> for GearCommand {
    fn from(gear: i32) -> Self {
        Self(gear)
    }
}

impl std::fmt::Display for GearCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            g if g < 0 => write!(f, "R"),
            0 => write!(f, "N"),
            g => write!(f, "{g}"),
        }
    }
}

/// Static gearbox data of one car, as reported by the simulator.
///
/// `ratios` is indexed by `gear + offset`; ratios already include the final
/// drive. `redline` is the engine redline in rad/s and `wheel_radius` the
/// driven wheel radius in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gearbox {
    pub ratios: Vec<f64>,
    pub offset: i32,
    pub redline: f64,
    pub wheel_radius: f64,
    /// Exclusive upper bound on gear commands handled by the clutch model
    pub gear_count: i32,
}

impl Gearbox {
    pub fn new(ratios: Vec<f64>, offset: i32, redline: f64, wheel_radius: f64, gear_count: i32) -> Self {
        Self {
            ratios,
            offset,
            redline,
            wheel_radius,
            gear_count,
        }
    }

    /// Six-speed road car with reverse at index 0 and neutral at index 1.
    pub fn six_speed() -> Self {
        const FINAL_DRIVE: f64 = 4.5;
        let ratios = [-2.8, 0.0, 3.0, 2.0, 1.5, 1.2, 1.0, 0.85]
            .iter()
            .map(|r| r * FINAL_DRIVE)
            .collect();
        Self::new(ratios, 1, 1047.0, 0.33, 8)
    }

    /// Ratio for `gear`, or `None` when the table has no usable entry.
    ///
    /// Missing indices, zero ratios (neutral) and non-finite entries all map
    /// to `None`.
    pub fn ratio(&self, gear: GearCommand) -> Option<f64> {
        let index = usize::try_from(gear.get().checked_add(self.offset)?).ok()?;
        self.ratios
            .get(index)
            .copied()
            .filter(|r| r.is_finite() && *r != 0.0)
    }

    /// Highest forward gear present in the ratio table.
    pub fn top_gear(&self) -> GearCommand {
        let len = i32::try_from(self.ratios.len()).unwrap_or(i32::MAX);
        GearCommand::new(len.saturating_sub(self.offset).saturating_sub(1).max(0))
    }

    pub fn validate(&self) -> TransmissionResult<()> {
        if self.ratios.is_empty() {
            return Err(TransmissionError::EmptyRatioTable);
        }

        if let Some((index, value)) = self
            .ratios
            .iter()
            .copied()
            .enumerate()
            .find(|(_, r)| !r.is_finite())
        {
            return Err(TransmissionError::InvalidRatio { index, value });
        }

        let neutral_in_table = usize::try_from(self.offset)
            .map(|index| index < self.ratios.len())
            .unwrap_or(false);
        if !neutral_in_table {
            return Err(TransmissionError::InvalidOffset(self.offset));
        }

        if !(self.redline.is_finite() && self.redline > 0.0) {
            return Err(TransmissionError::InvalidRedline(self.redline));
        }

        if !(self.wheel_radius.is_finite() && self.wheel_radius > 0.0) {
            return Err(TransmissionError::InvalidWheelRadius(self.wheel_radius));
        }

        if self.gear_count < 1 {
            return Err(TransmissionError::InvalidParameter {
                field: "gear_count",
                reason: format!("must be at least 1, got {}", self.gear_count),
            });
        }

        Ok(())
    }
}

impl Default for Gearbox {
    fn default() -> Self {
        Self::six_speed()
    }
}
