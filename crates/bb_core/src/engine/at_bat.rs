//! Plate-appearance simulation
//!
//! One batter against one pitcher produces exactly one [`PlateAppearance`].
//! The only side effect is the pitcher's stamina drain. Draws are consumed
//! in a fixed order: drain, outcome, then either hit type or out flavour.

use log::warn;

use super::config::EngineConfig;
use super::probability::{OutcomeRates, PitcherEffectiveness, RateBucket};
use super::probability_validator::ProbabilityValidator;
use super::rng::RandomSource;
use crate::models::{Batter, OutType, Outcome, Pitcher, PitcherSlot, PlateAppearance};

pub struct AtBatEngine<'a> {
    config: &'a EngineConfig,
    validator: ProbabilityValidator,
}

impl<'a> AtBatEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config, validator: ProbabilityValidator::strict() }
    }

    /// Rates this pitcher would face `batter` with right now, no draws.
    pub fn rates_for(&self, batter: &Batter, pitcher: &Pitcher) -> OutcomeRates {
        let eff = self.effectiveness(pitcher);
        OutcomeRates::compute(batter.attributes(), pitcher.attributes(), eff, &self.config.rates)
    }

    pub fn simulate_at_bat<R: RandomSource + ?Sized>(
        &self,
        batter: &Batter,
        batter_slot: usize,
        pitcher: &mut Pitcher,
        pitcher_slot: PitcherSlot,
        rng: &mut R,
    ) -> PlateAppearance {
        // Effectiveness uses stamina from before this batter
        let eff = self.effectiveness(pitcher);
        self.drain(pitcher, rng);

        let rates =
            OutcomeRates::compute(batter.attributes(), pitcher.attributes(), eff, &self.config.rates);
        if let Err(e) = self.validator.validate_rates(&rates) {
            warn!("Outcome rates for {} vs {} not closed: {}", batter.name(), pitcher.name(), e);
        }

        let outcome = match rates.sample(rng.next_f64()) {
            RateBucket::Strikeout => Outcome::Strikeout,
            RateBucket::Walk => Outcome::Walk,
            RateBucket::HomeRun => Outcome::HomeRun,
            RateBucket::OtherHit => self.hit_type(batter.speed(), rng),
            RateBucket::Out => {
                let out_type = OutType::ALL[rng.next_below(OutType::ALL.len())];
                Outcome::Out { out_type }
            }
        };

        PlateAppearance {
            description: outcome.describe(batter.name()),
            outcome,
            batter_slot,
            pitcher: pitcher_slot,
        }
    }

    fn effectiveness(&self, pitcher: &Pitcher) -> PitcherEffectiveness {
        PitcherEffectiveness::compute(
            pitcher.attributes(),
            pitcher.stamina_fraction(),
            &self.config.rates,
            &self.config.stamina,
        )
    }

    /// Whole-unit step in `[min, max]`, e.g. 2.5 / 3.5 / 4.5
    fn drain<R: RandomSource + ?Sized>(&self, pitcher: &mut Pitcher, rng: &mut R) {
        let stamina = &self.config.stamina;
        let amount = stamina.drain_per_batter_min + rng.next_below(stamina.drain_steps()) as f64;
        pitcher.drain_stamina(amount);
    }

    /// Single or double. A single gets one speed-gated stretch attempt;
    /// a fast runner who misses the fast draw still gets the medium one.
    fn hit_type<R: RandomSource + ?Sized>(&self, speed: f64, rng: &mut R) -> Outcome {
        let s = &self.config.speed;
        if rng.next_f64() < s.base_hit_double_chance {
            return Outcome::Double;
        }
        let stretched = (speed > s.fast_threshold && rng.next_f64() < s.stretch_single_fast)
            || (speed > s.medium_threshold && rng.next_f64() < s.stretch_single_medium);
        if stretched {
            Outcome::Double
        } else {
            Outcome::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{ScriptedRandom, SeededRandom};
    use crate::models::{BatterAttributes, PitcherAttributes, PitcherRole};
    use proptest::prelude::*;

    fn batter(speed: f64) -> Batter {
        Batter::new("Hitter", BatterAttributes::new(5.0, 5.0, 5.0, speed)).unwrap()
    }

    fn pitcher(max_stamina: f64) -> Pitcher {
        Pitcher::new("Arm", PitcherRole::Starter, PitcherAttributes::uniform(5.0), max_stamina).unwrap()
    }

    fn run(engine: &AtBatEngine, b: &Batter, p: &mut Pitcher, draws: &[f64]) -> Outcome {
        let mut rng = ScriptedRandom::new(draws.iter().copied());
        engine.simulate_at_bat(b, 0, p, PitcherSlot::Starter(0), &mut rng).outcome
    }

    #[test]
    fn test_scripted_outcomes() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let b = batter(5.0);
        let mut p = pitcher(100.0);

        // [drain, outcome, ...]
        assert_eq!(run(&engine, &b, &mut p, &[0.0, 0.10]), Outcome::Strikeout);
        assert_eq!(run(&engine, &b, &mut p, &[0.0, 0.25]), Outcome::Walk);
        assert_eq!(run(&engine, &b, &mut p, &[0.0, 0.30]), Outcome::HomeRun);
        assert_eq!(run(&engine, &b, &mut p, &[0.0, 0.50, 0.9]), Outcome::Single);
        assert_eq!(run(&engine, &b, &mut p, &[0.0, 0.50, 0.1]), Outcome::Double);
        assert_eq!(
            run(&engine, &b, &mut p, &[0.0, 0.90, 0.0]),
            Outcome::Out { out_type: OutType::GroundsOut }
        );
    }

    #[test]
    fn test_fast_runner_gets_second_stretch_draw() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let mut p = pitcher(100.0);

        // Misses base double, misses fast stretch (0.35 >= 0.30), makes medium (0.10 < 0.15)
        assert_eq!(run(&engine, &batter(8.0), &mut p, &[0.0, 0.5, 0.9, 0.35, 0.10]), Outcome::Double);
        // Medium runner only gets the medium draw
        assert_eq!(run(&engine, &batter(6.0), &mut p, &[0.0, 0.5, 0.9, 0.10]), Outcome::Double);
        assert_eq!(run(&engine, &batter(6.0), &mut p, &[0.0, 0.5, 0.9, 0.20]), Outcome::Single);
        // Slow runner never stretches
        assert_eq!(run(&engine, &batter(5.0), &mut p, &[0.0, 0.5, 0.9, 0.0]), Outcome::Single);
    }

    #[test]
    fn test_triple_never_sampled() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let b = batter(10.0);
        let mut p = pitcher(1.0e9);
        let mut rng = SeededRandom::new(11);
        for _ in 0..2000 {
            let pa = engine.simulate_at_bat(&b, 0, &mut p, PitcherSlot::Starter(0), &mut rng);
            assert_ne!(pa.outcome, Outcome::Triple);
        }
    }

    #[test]
    fn test_drain_steps() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let b = batter(5.0);

        for (draw, expected) in [(0.0, 2.5), (0.5, 3.5), (0.99, 4.5)] {
            let mut p = pitcher(100.0);
            run(&engine, &b, &mut p, &[draw, 0.9, 0.0]);
            assert!((100.0 - p.current_stamina() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_strikeout_rate_within_band_fresh_pitcher() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let b = batter(5.0);
        let mut p = pitcher(100.0);
        let mut rng = SeededRandom::new(2024);

        let mut strikeouts = 0;
        for _ in 0..1000 {
            p.reset_for_game();
            let pa = engine.simulate_at_bat(&b, 0, &mut p, PitcherSlot::Starter(0), &mut rng);
            if pa.outcome == Outcome::Strikeout {
                strikeouts += 1;
            }
        }
        let rate = strikeouts as f64 / 1000.0;
        assert!(cfg.rates.caps.strikeout.contains(rate), "strikeout rate {}", rate);
    }

    #[test]
    fn test_exhausted_pitcher_still_resolves() {
        let cfg = EngineConfig::classic();
        let engine = AtBatEngine::new(&cfg);
        let b = batter(5.0);
        let mut p = pitcher(20.0);
        let mut rng = SeededRandom::new(5);

        for _ in 0..50 {
            engine.simulate_at_bat(&b, 0, &mut p, PitcherSlot::Starter(0), &mut rng);
        }
        assert_eq!(p.current_stamina(), 0.0);
        assert_eq!(p.stamina_fraction(), 0.0);

        let eff = engine.effectiveness(&p);
        assert!((eff.power - 3.0).abs() < 1e-12);
        let rates = engine.rates_for(&b, &p);
        assert!(ProbabilityValidator::strict().validate_rates(&rates).is_ok());

        let pa = engine.simulate_at_bat(&b, 0, &mut p, PitcherSlot::Starter(0), &mut rng);
        assert!(!pa.description.is_empty());
    }

    proptest! {
        #[test]
        fn prop_stamina_non_increasing(seed in any::<u64>(), max in 1.0f64..150.0) {
            let cfg = EngineConfig::classic();
            let engine = AtBatEngine::new(&cfg);
            let b = batter(5.0);
            let mut p = pitcher(max);
            let mut rng = SeededRandom::new(seed);
            let mut last = p.current_stamina();
            for _ in 0..60 {
                engine.simulate_at_bat(&b, 0, &mut p, PitcherSlot::Starter(0), &mut rng);
                prop_assert!(p.current_stamina() <= last);
                prop_assert!(p.current_stamina() >= 0.0);
                last = p.current_stamina();
            }
        }
    }
}
