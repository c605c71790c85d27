//! Outcome-rate configuration: base rates, stat normalization and caps.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// League-average rates for the four determined outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BaseRates {
    pub strikeout: f64,
    pub walk: f64,
    pub home_run: f64,
    pub other_hit: f64,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self { strikeout: 0.21, walk: 0.08, home_run: 0.04, other_hit: 0.265 }
    }
}

/// Per-point effect of `(attribute - neutral)` on each rate.
///
/// Signs are meaningful: a negative coefficient lowers the rate as the
/// attribute rises above neutral. The walk coefficient is applied as a
/// magnitude against `(neutral - effective_control)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatNormalization {
    pub pitcher_power_on_strikeout: f64,
    pub velocity_on_strikeout: f64,
    pub technique_on_strikeout: f64,
    pub batter_contact_on_strikeout: f64,
    pub pitcher_control_on_walk: f64,
    pub batter_power_on_home_run: f64,
    pub pitcher_power_on_home_run: f64,
    pub technique_on_home_run: f64,
    pub batter_hit_rate_on_hit: f64,
    pub pitcher_power_on_hit: f64,
    pub velocity_on_hit: f64,
}

impl Default for StatNormalization {
    fn default() -> Self {
        Self {
            pitcher_power_on_strikeout: 0.0024,
            velocity_on_strikeout: 0.0020,
            technique_on_strikeout: 0.0008,
            batter_contact_on_strikeout: -0.0033,
            pitcher_control_on_walk: -0.0023,
            batter_power_on_home_run: 0.0017,
            pitcher_power_on_home_run: -0.00023,
            technique_on_home_run: -0.0013,
            batter_hit_rate_on_hit: 0.0022,
            pitcher_power_on_hit: -0.0015,
            velocity_on_hit: -0.0015,
        }
    }
}

impl StatNormalization {
    /// Same coefficients with every magnitude multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            pitcher_power_on_strikeout: self.pitcher_power_on_strikeout * factor,
            velocity_on_strikeout: self.velocity_on_strikeout * factor,
            technique_on_strikeout: self.technique_on_strikeout * factor,
            batter_contact_on_strikeout: self.batter_contact_on_strikeout * factor,
            pitcher_control_on_walk: self.pitcher_control_on_walk * factor,
            batter_power_on_home_run: self.batter_power_on_home_run * factor,
            pitcher_power_on_home_run: self.pitcher_power_on_home_run * factor,
            technique_on_home_run: self.technique_on_home_run * factor,
            batter_hit_rate_on_hit: self.batter_hit_rate_on_hit * factor,
            pitcher_power_on_hit: self.pitcher_power_on_hit * factor,
            velocity_on_hit: self.velocity_on_hit * factor,
        }
    }
}

/// Inclusive `[min, max]` band for one rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
}

impl RateBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProbabilityCaps {
    pub strikeout: RateBand,
    pub walk: RateBand,
    pub home_run: RateBand,
    pub other_hit: RateBand,
    /// Floor for the residual generic-out rate
    pub out_min: f64,
    /// Max sum of the four determined rates before the out rate is derived
    pub determined_sum_cap: f64,
}

impl Default for ProbabilityCaps {
    fn default() -> Self {
        Self {
            strikeout: RateBand::new(0.05, 0.50),
            walk: RateBand::new(0.02, 0.30),
            home_run: RateBand::new(0.005, 0.10),
            other_hit: RateBand::new(0.05, 0.40),
            out_min: 0.10,
            determined_sum_cap: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatesConfig {
    /// Attribute value treated as league average (scale midpoint)
    pub neutral: f64,
    /// Velocity contribution to effective power per point above neutral
    pub velocity_power_coeff: f64,
    /// Velocity contribution to effective control per point above neutral
    pub velocity_control_coeff: f64,
    pub base: BaseRates,
    pub normalization: StatNormalization,
    pub caps: ProbabilityCaps,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            neutral: 5.0,
            velocity_power_coeff: 0.5,
            velocity_control_coeff: 0.2,
            base: BaseRates::default(),
            normalization: StatNormalization::default(),
            caps: ProbabilityCaps::default(),
        }
    }
}

impl RatesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.neutral > 0.0) {
            return Err(ConfigError::InvalidNeutral(self.neutral));
        }

        let bands = [
            ("strikeout", self.caps.strikeout),
            ("walk", self.caps.walk),
            ("home_run", self.caps.home_run),
            ("other_hit", self.caps.other_hit),
        ];
        for (name, band) in bands {
            if band.min > band.max {
                return Err(ConfigError::InvertedBand { name, min: band.min, max: band.max });
            }
            check_probability(name, band.min)?;
            check_probability(name, band.max)?;
        }

        check_probability("out_min", self.caps.out_min)?;
        check_probability("determined_sum_cap", self.caps.determined_sum_cap)?;
        check_probability("base.strikeout", self.base.strikeout)?;
        check_probability("base.walk", self.base.walk)?;
        check_probability("base.home_run", self.base.home_run)?;
        check_probability("base.other_hit", self.base.other_hit)?;
        Ok(())
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_clamp() {
        let band = RateBand::new(0.05, 0.5);
        assert_eq!(band.clamp(0.01), 0.05);
        assert_eq!(band.clamp(0.7), 0.5);
        assert_eq!(band.clamp(0.3), 0.3);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut cfg = RatesConfig::default();
        cfg.caps.walk = RateBand::new(0.4, 0.1);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvertedBand { name: "walk", .. })));
    }

    #[test]
    fn test_scaled_keeps_signs() {
        let scaled = StatNormalization::default().scaled(0.1);
        assert!(scaled.batter_contact_on_strikeout < 0.0);
        assert!((scaled.pitcher_power_on_strikeout - 0.00024).abs() < 1e-12);
    }
}
