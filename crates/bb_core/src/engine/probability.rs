//! Plate-appearance outcome probabilities
//!
//! Pure functions from batter/pitcher attributes to a five-way distribution
//! over strikeout, walk, home run, other hit and out. Every attribute effect
//! is linear in `(attribute - neutral)`, so the same code serves any
//! attribute scale once the neutral baseline and coefficients are set.
//!
//! Pipeline:
//! 1. [`PitcherEffectiveness::compute`]: velocity bonus and stamina penalty
//! 2. [`OutcomeRates::banded`]: base rate + linear adjustments, clamped per band
//! 3. [`OutcomeRates::compute`]: sum cap, out floor, final normalization

use serde::{Deserialize, Serialize};

use crate::engine::config::{RatesConfig, StaminaConfig};
use crate::models::{BatterAttributes, PitcherAttributes};

/// Pitcher power/control after velocity and fatigue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitcherEffectiveness {
    pub power: f64,
    pub control: f64,
}

impl PitcherEffectiveness {
    /// `stamina_fraction` is read before this at-bat's drain.
    pub fn compute(
        attrs: &PitcherAttributes,
        stamina_fraction: f64,
        rates: &RatesConfig,
        stamina: &StaminaConfig,
    ) -> Self {
        let velocity_delta = attrs.velocity - rates.neutral;
        let mut power = attrs.power + velocity_delta * rates.velocity_power_coeff;
        let mut control = attrs.control + velocity_delta * rates.velocity_control_coeff;

        let penalty = if stamina_fraction < stamina.penalty_threshold_low {
            stamina.penalty_amount_low
        } else if stamina_fraction < stamina.penalty_threshold_high {
            stamina.penalty_amount_high
        } else {
            0.0
        };
        power -= penalty;
        control -= penalty;

        Self { power: power.max(1.0), control: control.max(1.0) }
    }
}

/// Which band of the cumulative distribution a draw landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateBucket {
    Strikeout,
    Walk,
    HomeRun,
    OtherHit,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRates {
    pub strikeout: f64,
    pub walk: f64,
    pub home_run: f64,
    pub other_hit: f64,
    pub out: f64,
}

impl OutcomeRates {
    /// Adjusted determined rates, each clamped to its band. `out` is left at 0.
    pub fn banded(
        batter: &BatterAttributes,
        pitcher: &PitcherAttributes,
        eff: PitcherEffectiveness,
        cfg: &RatesConfig,
    ) -> Self {
        let n = cfg.neutral;
        let c = &cfg.normalization;
        let b = &cfg.base;
        let caps = &cfg.caps;

        let strikeout = b.strikeout
            + (eff.power - n) * c.pitcher_power_on_strikeout
            + (pitcher.velocity - n) * c.velocity_on_strikeout
            + (pitcher.technique - n) * c.technique_on_strikeout
            + (batter.contact - n) * c.batter_contact_on_strikeout;

        // Better control means fewer walks regardless of the coefficient's sign
        let walk = b.walk + (n - eff.control) * c.pitcher_control_on_walk.abs();

        let home_run = b.home_run
            + (batter.power - n) * c.batter_power_on_home_run
            + (eff.power - n) * c.pitcher_power_on_home_run
            + (pitcher.technique - n) * c.technique_on_home_run;

        let other_hit = b.other_hit
            + (batter.hit_rate - n) * c.batter_hit_rate_on_hit
            + (eff.power - n) * c.pitcher_power_on_hit
            + (pitcher.velocity - n) * c.velocity_on_hit;

        Self {
            strikeout: caps.strikeout.clamp(strikeout),
            walk: caps.walk.clamp(walk),
            home_run: caps.home_run.clamp(home_run),
            other_hit: caps.other_hit.clamp(other_hit),
            out: 0.0,
        }
    }

    /// Full distribution, summing to 1.
    pub fn compute(
        batter: &BatterAttributes,
        pitcher: &PitcherAttributes,
        eff: PitcherEffectiveness,
        cfg: &RatesConfig,
    ) -> Self {
        Self::banded(batter, pitcher, eff, cfg).finalize(cfg.caps.determined_sum_cap, cfg.caps.out_min)
    }

    /// Sum cap, out floor and normalization applied to banded rates.
    pub fn finalize(mut self, sum_cap: f64, out_min: f64) -> Self {
        let determined = self.determined_sum();
        if determined > sum_cap && determined > 0.0 {
            let factor = sum_cap / determined;
            self.scale_determined(factor);
        }

        self.out = 1.0 - self.determined_sum();
        if self.out < out_min {
            let deficit = out_min - self.out;
            let total = self.determined_sum();
            if total > 0.0 {
                self.strikeout -= deficit * (self.strikeout / total);
                self.walk -= deficit * (self.walk / total);
                self.home_run -= deficit * (self.home_run / total);
                self.other_hit -= deficit * (self.other_hit / total);
            }
            self.out = out_min;
        }

        let sum = self.total();
        if sum == 0.0 {
            self.out = 1.0;
        } else if (sum - 1.0).abs() > f64::EPSILON {
            self.scale_determined(1.0 / sum);
            self.out /= sum;
        }
        self
    }

    pub fn determined_sum(&self) -> f64 {
        self.strikeout + self.walk + self.home_run + self.other_hit
    }

    pub fn total(&self) -> f64 {
        self.determined_sum() + self.out
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.strikeout, self.walk, self.home_run, self.other_hit, self.out]
    }

    /// Walks the cumulative distribution in fixed order; `draw` is in `[0, 1)`.
    pub fn sample(&self, draw: f64) -> RateBucket {
        let mut cumulative = self.strikeout;
        if draw < cumulative {
            return RateBucket::Strikeout;
        }
        cumulative += self.walk;
        if draw < cumulative {
            return RateBucket::Walk;
        }
        cumulative += self.home_run;
        if draw < cumulative {
            return RateBucket::HomeRun;
        }
        cumulative += self.other_hit;
        if draw < cumulative {
            return RateBucket::OtherHit;
        }
        RateBucket::Out
    }

    fn scale_determined(&mut self, factor: f64) {
        self.strikeout *= factor;
        self.walk *= factor;
        self.home_run *= factor;
        self.other_hit *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::probability_validator::ProbabilityValidator;
    use proptest::prelude::*;

    fn neutral_rates(cfg: &EngineConfig) -> OutcomeRates {
        let batter = BatterAttributes::uniform(5.0);
        let pitcher = PitcherAttributes::uniform(5.0);
        let eff = PitcherEffectiveness::compute(&pitcher, 1.0, &cfg.rates, &cfg.stamina);
        OutcomeRates::compute(&batter, &pitcher, eff, &cfg.rates)
    }

    #[test]
    fn test_neutral_matchup_uses_base_rates() {
        let cfg = EngineConfig::classic();
        let rates = neutral_rates(&cfg);
        assert!((rates.strikeout - 0.21).abs() < 1e-12);
        assert!((rates.walk - 0.08).abs() < 1e-12);
        assert!((rates.home_run - 0.04).abs() < 1e-12);
        assert!((rates.other_hit - 0.265).abs() < 1e-12);
        assert!((rates.out - 0.405).abs() < 1e-12);
    }

    #[test]
    fn test_effectiveness_velocity_and_penalties() {
        let cfg = EngineConfig::classic();
        let attrs = PitcherAttributes::new(6.0, 7.0, 5.0, 5.0);

        let fresh = PitcherEffectiveness::compute(&attrs, 1.0, &cfg.rates, &cfg.stamina);
        assert!((fresh.power - 7.0).abs() < 1e-12);
        assert!((fresh.control - 5.4).abs() < 1e-12);

        let tiring = PitcherEffectiveness::compute(&attrs, 0.45, &cfg.rates, &cfg.stamina);
        assert!((tiring.power - 5.5).abs() < 1e-12);

        let spent = PitcherEffectiveness::compute(&attrs, 0.0, &cfg.rates, &cfg.stamina);
        assert!((spent.power - 5.0).abs() < 1e-12);
        assert!((spent.control - 3.4).abs() < 1e-12);
    }

    #[test]
    fn test_effectiveness_floor() {
        let cfg = EngineConfig::classic();
        let attrs = PitcherAttributes::new(1.0, 1.0, 1.0, 1.0);
        let eff = PitcherEffectiveness::compute(&attrs, 0.0, &cfg.rates, &cfg.stamina);
        assert_eq!(eff.power, 1.0);
        assert_eq!(eff.control, 1.0);
    }

    #[test]
    fn test_sum_cap_then_out_floor() {
        let rates = OutcomeRates { strikeout: 0.5, walk: 0.3, home_run: 0.1, other_hit: 0.4, out: 0.0 }
            .finalize(0.95, 0.10);
        assert!((rates.out - 0.10).abs() < 1e-9);
        assert!((rates.total() - 1.0).abs() < 1e-9);
        // Proportions among determined rates survive both reductions
        assert!((rates.strikeout / rates.walk - 0.5 / 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_forces_out() {
        let rates = OutcomeRates { strikeout: 0.0, walk: 0.0, home_run: 0.0, other_hit: 0.0, out: 0.0 }
            .finalize(0.95, 0.0);
        assert_eq!(rates.out, 1.0);
        assert_eq!(rates.determined_sum(), 0.0);
    }

    #[test]
    fn test_sample_order() {
        let cfg = EngineConfig::classic();
        let rates = neutral_rates(&cfg);
        assert_eq!(rates.sample(0.0), RateBucket::Strikeout);
        assert_eq!(rates.sample(0.20), RateBucket::Strikeout);
        assert_eq!(rates.sample(0.25), RateBucket::Walk);
        assert_eq!(rates.sample(0.30), RateBucket::HomeRun);
        assert_eq!(rates.sample(0.50), RateBucket::OtherHit);
        assert_eq!(rates.sample(0.60), RateBucket::Out);
        assert_eq!(rates.sample(0.999_999), RateBucket::Out);
    }

    fn attribute() -> impl Strategy<Value = f64> {
        0.0f64..=10.0
    }

    proptest! {
        #[test]
        fn prop_distribution_closes(
            bp in attribute(), bh in attribute(), bc in attribute(), bs in attribute(),
            pp in attribute(), pv in attribute(), pc in attribute(), pt in attribute(),
            stamina in 0.0f64..=1.0,
        ) {
            let cfg = EngineConfig::classic();
            let batter = BatterAttributes::new(bp, bh, bc, bs);
            let pitcher = PitcherAttributes::new(pp, pv, pc, pt);
            let eff = PitcherEffectiveness::compute(&pitcher, stamina, &cfg.rates, &cfg.stamina);
            let rates = OutcomeRates::compute(&batter, &pitcher, eff, &cfg.rates);

            let validator = ProbabilityValidator::strict();
            prop_assert!(validator.validate_distribution(&rates.as_array()).is_ok());
            prop_assert!(rates.out >= cfg.rates.caps.out_min - 1e-9);
        }

        #[test]
        fn prop_banded_rates_within_caps(
            bp in 0.0f64..=100.0, bh in 0.0f64..=100.0, bc in 0.0f64..=100.0,
            pp in 0.0f64..=100.0, pv in 0.0f64..=100.0, pc in 0.0f64..=100.0, pt in 0.0f64..=100.0,
            stamina in 0.0f64..=1.0,
        ) {
            let cfg = EngineConfig::wide_scale();
            let batter = BatterAttributes::new(bp, bh, bc, 50.0);
            let pitcher = PitcherAttributes::new(pp, pv, pc, pt);
            let eff = PitcherEffectiveness::compute(&pitcher, stamina, &cfg.rates, &cfg.stamina);
            let banded = OutcomeRates::banded(&batter, &pitcher, eff, &cfg.rates);
            let caps = &cfg.rates.caps;

            prop_assert!(caps.strikeout.contains(banded.strikeout));
            prop_assert!(caps.walk.contains(banded.walk));
            prop_assert!(caps.home_run.contains(banded.home_run));
            prop_assert!(caps.other_hit.contains(banded.other_hit));
        }
    }
}
