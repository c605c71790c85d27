//! Base-running and scoring resolution
//!
//! Runners are lineup slots of the batting team. Existing runners are moved
//! from third base down to first so a trailing runner never lands on a lead
//! runner that has not moved yet. Walks use forced advancement only.

use serde::{Deserialize, Serialize};

use super::config::SpeedConfig;
use super::rng::RandomSource;
use crate::models::{Batter, Outcome};

/// Three base slots, each holding at most one runner (a lineup slot).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bases([Option<usize>; 3]);

impl Bases {
    pub const fn empty() -> Self {
        Self([None; 3])
    }

    pub const fn from_slots(slots: [Option<usize>; 3]) -> Self {
        Self(slots)
    }

    pub fn loaded(first: usize, second: usize, third: usize) -> Self {
        Self([Some(first), Some(second), Some(third)])
    }

    /// Runner on base index `i` (0 = first)
    pub fn get(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied().flatten()
    }

    pub fn slots(&self) -> [Option<usize>; 3] {
        self.0
    }

    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.occupied() == 3
    }

    pub fn clear(&mut self) {
        self.0 = [None; 3];
    }

    /// No runner appears on two bases
    pub fn is_consistent(&self) -> bool {
        let runners: Vec<usize> = self.0.iter().flatten().copied().collect();
        runners.iter().enumerate().all(|(i, r)| !runners[i + 1..].contains(r))
    }
}

/// Everything one play changes, applied afterwards by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResolution {
    pub bases: Bases,
    pub runs: u32,
    /// Every run on a play is credited to the batter
    pub rbi: u32,
    pub outs: u32,
    /// Lineup slots that crossed the plate, in scoring order
    pub scorers: Vec<usize>,
}

impl PlayResolution {
    fn unchanged(bases: Bases) -> Self {
        Self { bases, runs: 0, rbi: 0, outs: 0, scorers: Vec::new() }
    }

    fn score(&mut self, runner: usize) {
        self.runs += 1;
        self.rbi += 1;
        self.scorers.push(runner);
    }
}

/// Resolves `outcome` for the batter in `batter_slot` against `bases`.
///
/// `lineup` supplies runner speeds; a runner slot missing from it is
/// treated as a slow runner.
pub fn resolve<R: RandomSource + ?Sized>(
    outcome: &Outcome,
    batter_slot: usize,
    bases: &Bases,
    lineup: &[Batter],
    speed: &SpeedConfig,
    rng: &mut R,
) -> PlayResolution {
    let mut play = PlayResolution::unchanged(*bases);

    match outcome {
        Outcome::Strikeout | Outcome::Out { .. } => {
            play.outs = 1;
        }
        Outcome::Walk => {
            force_walk(&mut play, batter_slot);
        }
        Outcome::Single | Outcome::Double | Outcome::Triple | Outcome::HomeRun => {
            let advance = outcome.bases_advanced() as usize;
            advance_runners(&mut play, advance, lineup, speed, rng);
            if advance >= 4 {
                play.score(batter_slot);
            } else {
                play.bases.0[advance - 1] = Some(batter_slot);
            }
        }
    }

    play
}

fn force_walk(play: &mut PlayResolution, batter_slot: usize) {
    let slots = &mut play.bases.0;
    let mut scored = None;
    if slots[0].is_some() {
        if slots[1].is_some() {
            if let Some(runner) = slots[2] {
                scored = Some(runner);
            }
            slots[2] = slots[1];
        }
        slots[1] = slots[0];
    }
    slots[0] = Some(batter_slot);

    if let Some(runner) = scored {
        play.score(runner);
    }
}

fn advance_runners<R: RandomSource + ?Sized>(
    play: &mut PlayResolution,
    advance: usize,
    lineup: &[Batter],
    speed: &SpeedConfig,
    rng: &mut R,
) {
    for origin in (0..3).rev() {
        let Some(runner) = play.bases.0[origin] else {
            continue;
        };

        let mut runner_advance = advance;
        if advance == 1 || advance == 2 {
            let runner_speed = lineup.get(runner).map(Batter::speed).unwrap_or(0.0);
            let extra = (runner_speed > speed.fast_threshold
                && rng.next_f64() < speed.runner_extra_base_fast)
                || (runner_speed > speed.medium_threshold
                    && rng.next_f64() < speed.runner_extra_base_medium);
            if extra {
                runner_advance += 1;
            }
        }

        play.bases.0[origin] = None;
        let target = origin + runner_advance;
        if target >= 3 {
            play.score(runner);
        } else {
            play.bases.0[target] = Some(runner);
        }
    }
}
