//! Per-race controller statistics.

use serde::{Deserialize, Serialize};

/// Counters collected since the last race start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStats {
    pub ticks: u64,
    pub upshifts: u64,
    pub downshifts: u64,
    pub reverse_engagements: u64,
    pub reverse_releases: u64,
    /// Ticks on which the stuck signal was raised
    pub stuck_ticks: u64,
}

impl ControllerStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Share of ticks spent stuck, in percent.
    pub fn stuck_percent(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.stuck_ticks as f64 / self.ticks as f64 * 100.0
        }
    }
}
