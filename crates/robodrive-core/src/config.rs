//! Controller configuration.
//!
//! Every constant of the controller lives here with its reference value as the
//! default, so an empty config file reproduces the stock behaviour.

use robodrive_filters::{PedalConfig, SteeringConfig};
use robodrive_transmission::{ClutchConfig, ReverseConfig, ShiftConfig};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_non_negative};
use crate::stuck::StuckConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub steering: SteeringConfig,
    pub pedals: PedalConfig,
    pub shift: ShiftConfig,
    pub reverse: ReverseConfig,
    pub clutch: ClutchConfig,
    pub stuck: StuckConfig,
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("steering.rate", self.steering.rate)?;
        ensure_non_negative("steering.speed_scale", self.steering.speed_scale)?;

        if !self.pedals.grace_period_s.is_finite() {
            return Err(ConfigError::InvalidParameter {
                field: "pedals.grace_period_s",
                reason: format!("must be finite, got {}", self.pedals.grace_period_s),
            });
        }
        ensure_non_negative("pedals.max_increase_per_tick", self.pedals.max_increase_per_tick)?;

        self.shift.validate()?;
        self.reverse.validate()?;
        self.clutch.validate()?;
        self.stuck.validate()
    }
}
