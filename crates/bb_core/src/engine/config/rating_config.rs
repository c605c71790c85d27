//! Overall (OVR) rating weights

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatterWeights {
    pub power: f64,
    pub hit_rate: f64,
    pub contact: f64,
    pub speed: f64,
    pub scale: f64,
    pub base: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitcherWeights {
    pub power: f64,
    pub velocity: f64,
    pub control: f64,
    pub technique: f64,
    /// Weight of the max-stamina bonus (0..5 points above 60 stamina)
    pub stamina_effect: f64,
    pub scale: f64,
    pub base: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingConfig {
    pub batter: BatterWeights,
    pub pitcher: PitcherWeights,
    pub min_rating: u8,
    pub max_rating: u8,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            batter: BatterWeights {
                power: 0.28,
                hit_rate: 0.28,
                contact: 0.22,
                speed: 0.12,
                scale: 1.0,
                base: 2.5,
            },
            pitcher: PitcherWeights {
                power: 0.30,
                velocity: 0.30,
                control: 0.25,
                technique: 0.15,
                stamina_effect: 0.05,
                scale: 1.0,
                base: 1.4,
            },
            min_rating: 40,
            max_rating: 99,
        }
    }
}

impl RatingConfig {
    /// Weights for attributes on the 1-10 scale (ratings still land on 40-99).
    pub fn for_classic_scale() -> Self {
        let mut cfg = Self::default();
        cfg.batter.scale = 10.0;
        cfg.pitcher.scale = 10.0;
        cfg
    }

    pub fn clamp(&self, raw: f64) -> u8 {
        let rounded = raw.round();
        rounded.max(self.min_rating as f64).min(self.max_rating as f64) as u8
    }
}
