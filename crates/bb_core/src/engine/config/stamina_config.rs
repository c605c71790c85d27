//! Pitcher stamina configuration

use serde::{Deserialize, Serialize};

use super::rates_config::check_probability;
use crate::error::ConfigError;

/// Stamina penalties and per-batter drain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaminaConfig {
    // === Penalty Steps ===
    /// Stamina fraction below which the mild penalty applies (default: 0.50)
    pub penalty_threshold_high: f64,
    /// Attribute points removed from effective power/control (default: 1.5)
    pub penalty_amount_high: f64,
    /// Stamina fraction below which the heavy penalty applies (default: 0.32)
    pub penalty_threshold_low: f64,
    /// Attribute points removed below the low threshold (default: 2.0)
    pub penalty_amount_low: f64,

    // === Drain ===
    /// Smallest drain per batter faced (default: 2.5)
    pub drain_per_batter_min: f64,
    /// Largest drain per batter faced (default: 4.5)
    pub drain_per_batter_max: f64,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            penalty_threshold_high: 0.50,
            penalty_amount_high: 1.5,
            penalty_threshold_low: 0.32,
            penalty_amount_low: 2.0,

            drain_per_batter_min: 2.5,
            drain_per_batter_max: 4.5,
        }
    }
}

impl StaminaConfig {
    /// Number of whole-unit drain steps between min and max, inclusive.
    pub fn drain_steps(&self) -> usize {
        ((self.drain_per_batter_max - self.drain_per_batter_min).floor() as usize).saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("penalty_amount_high", self.penalty_amount_high),
            ("penalty_amount_low", self.penalty_amount_low),
            ("drain_per_batter_min", self.drain_per_batter_min),
            ("drain_per_batter_max", self.drain_per_batter_max),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        check_probability("penalty_threshold_high", self.penalty_threshold_high)?;
        check_probability("penalty_threshold_low", self.penalty_threshold_low)?;
        if self.penalty_threshold_low > self.penalty_threshold_high {
            return Err(ConfigError::InvertedThresholds {
                low: self.penalty_threshold_low,
                high: self.penalty_threshold_high,
            });
        }
        if self.drain_per_batter_min < 0.0 || self.drain_per_batter_min > self.drain_per_batter_max {
            return Err(ConfigError::InvertedDrain {
                min: self.drain_per_batter_min,
                max: self.drain_per_batter_max,
            });
        }
        Ok(())
    }
}
