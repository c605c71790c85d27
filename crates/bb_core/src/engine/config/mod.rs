//! # Engine Configuration Module
//!
//! All tuning constants for the plate-appearance engine in one place.
//!
//! ## Presets
//! - `classic`: attributes on a 1-10 scale, neutral 5 (default)
//! - `wide_scale`: attributes on a 1-99 scale, neutral 50
//!
//! The neutral baseline and the normalization coefficients are tied to the
//! attribute scale; presets change them together.
//!
//! ```rust
//! use bb_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let wide = EngineConfig::wide_scale();
//! assert!(wide.rates.neutral > config.rates.neutral);
//! ```

mod rates_config;
mod rating_config;
mod speed_config;
mod stamina_config;
mod substitution_config;

pub use rates_config::{BaseRates, ProbabilityCaps, RateBand, RatesConfig, StatNormalization};
pub use rating_config::{BatterWeights, PitcherWeights, RatingConfig};
pub use speed_config::SpeedConfig;
pub use stamina_config::StaminaConfig;
pub use substitution_config::SubstitutionConfig;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Regulation innings per game
    pub innings: u32,
    pub rates: RatesConfig,
    pub stamina: StaminaConfig,
    pub speed: SpeedConfig,
    #[serde(default)]
    pub substitution: SubstitutionConfig,
    #[serde(default)]
    pub rating: RatingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl EngineConfig {
    /// 1-10 attribute scale
    pub fn classic() -> Self {
        Self {
            innings: 9,
            rates: RatesConfig::default(),
            stamina: StaminaConfig::default(),
            speed: SpeedConfig::default(),
            substitution: SubstitutionConfig::default(),
            rating: RatingConfig::for_classic_scale(),
        }
    }

    /// 1-99 attribute scale
    pub fn wide_scale() -> Self {
        let mut cfg = Self::classic();
        cfg.rates.neutral = 50.0;
        cfg.rates.normalization = cfg.rates.normalization.scaled(0.1);
        cfg.stamina.penalty_amount_high *= 10.0;
        cfg.stamina.penalty_amount_low *= 10.0;
        cfg.speed.fast_threshold = 70.0;
        cfg.speed.medium_threshold = 50.0;
        cfg.rating = RatingConfig::default();
        cfg
    }

    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "classic" => Ok(Self::classic()),
            "wide_scale" | "wide" => Ok(Self::wide_scale()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_innings(mut self, innings: u32) -> Self {
        self.innings = innings;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.innings == 0 {
            return Err(ConfigError::NoInnings);
        }
        self.rates.validate()?;
        self.stamina.validate()?;
        self.speed.validate()?;
        Ok(())
    }
}

// ========== Tests ==========
