//! Speed-gated extra-base configuration

use serde::{Deserialize, Serialize};

use super::rates_config::check_probability;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeedConfig {
    /// Speed strictly above this counts as a fast runner (default: 7)
    pub fast_threshold: f64,
    /// Speed strictly above this counts as a medium runner (default: 5)
    pub medium_threshold: f64,
    /// Chance a fast batter stretches a single into a double
    pub stretch_single_fast: f64,
    /// Chance a medium batter stretches a single into a double
    pub stretch_single_medium: f64,
    /// Chance a fast runner takes an extra base on a single/double
    pub runner_extra_base_fast: f64,
    /// Chance a medium runner takes an extra base on a single/double
    pub runner_extra_base_medium: f64,
    /// Chance any base hit is a double before speed checks
    pub base_hit_double_chance: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            fast_threshold: 7.0,
            medium_threshold: 5.0,
            stretch_single_fast: 0.30,
            stretch_single_medium: 0.15,
            runner_extra_base_fast: 0.40,
            runner_extra_base_medium: 0.20,
            base_hit_double_chance: 0.25,
        }
    }
}

impl SpeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("stretch_single_fast", self.stretch_single_fast)?;
        check_probability("stretch_single_medium", self.stretch_single_medium)?;
        check_probability("runner_extra_base_fast", self.runner_extra_base_fast)?;
        check_probability("runner_extra_base_medium", self.runner_extra_base_medium)?;
        check_probability("base_hit_double_chance", self.base_hit_double_chance)?;
        Ok(())
    }
}
