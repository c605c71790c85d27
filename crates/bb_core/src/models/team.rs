use serde::{Deserialize, Serialize};

use super::player::{Batter, Pitcher, PitcherRole};
use super::records::TeamRecord;
use crate::error::RosterError;

/// Largest batting order a team may field
pub const MAX_LINEUP: usize = 12;

/// Smallest batting order a team may field.
///
/// Runners are tracked by lineup slot. With six or more batters, any five
/// plate appearances between two turns of the same batter include either
/// three outs or three runners reaching behind them, so a batter is never
/// still on base when their turn comes back.
pub const MIN_LINEUP: usize = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HalfInning {
    Top,
    Bottom,
}

impl HalfInning {
    /// Away bats in the top, home in the bottom
    pub fn batting_side(self) -> TeamSide {
        match self {
            HalfInning::Top => TeamSide::Away,
            HalfInning::Bottom => TeamSide::Home,
        }
    }

    pub fn fielding_side(self) -> TeamSide {
        self.batting_side().opponent()
    }
}

/// Addresses one pitcher on a staff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "slot", content = "index", rename_all = "lowercase")]
pub enum PitcherSlot {
    Starter(usize),
    Reliever,
    Closer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchingStaff {
    pub rotation: Vec<Pitcher>,
    pub reliever: Option<Pitcher>,
    pub closer: Option<Pitcher>,
}

impl PitchingStaff {
    pub fn new(rotation: Vec<Pitcher>, reliever: Option<Pitcher>, closer: Option<Pitcher>) -> Self {
        Self { rotation, reliever, closer }
    }

    /// Rotation slot that starts game `game_number`
    pub fn starter_for_game(&self, game_number: u32) -> Option<usize> {
        if self.rotation.is_empty() {
            None
        } else {
            Some(game_number as usize % self.rotation.len())
        }
    }

    pub fn get(&self, slot: PitcherSlot) -> Option<&Pitcher> {
        match slot {
            PitcherSlot::Starter(i) => self.rotation.get(i),
            PitcherSlot::Reliever => self.reliever.as_ref(),
            PitcherSlot::Closer => self.closer.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: PitcherSlot) -> Option<&mut Pitcher> {
        match slot {
            PitcherSlot::Starter(i) => self.rotation.get_mut(i),
            PitcherSlot::Reliever => self.reliever.as_mut(),
            PitcherSlot::Closer => self.closer.as_mut(),
        }
    }

    /// Every pitcher with its slot, rotation first
    pub fn iter(&self) -> impl Iterator<Item = (PitcherSlot, &Pitcher)> {
        self.rotation
            .iter()
            .enumerate()
            .map(|(i, p)| (PitcherSlot::Starter(i), p))
            .chain(self.reliever.iter().map(|p| (PitcherSlot::Reliever, p)))
            .chain(self.closer.iter().map(|p| (PitcherSlot::Closer, p)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pitcher> {
        self.rotation.iter_mut().chain(self.reliever.iter_mut()).chain(self.closer.iter_mut())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    name: String,
    pub lineup: Vec<Batter>,
    pub staff: PitchingStaff,
    /// One entry per inning; `None` until the team's half is complete
    pub score_per_inning: Vec<Option<u32>>,
    pub total_runs: u32,
    pub total_hits: u32,
    pub total_errors: u32,
    pub current_batter_index: usize,
    /// Rotation slot starting the current game
    pub starter: usize,
    pub record: TeamRecord,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        lineup: Vec<Batter>,
        staff: PitchingStaff,
    ) -> Result<Self, RosterError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RosterError::InvalidName("Team name cannot be empty".to_string()));
        }
        let team = Self {
            name,
            lineup,
            staff,
            score_per_inning: Vec::new(),
            total_runs: 0,
            total_hits: 0,
            total_errors: 0,
            current_batter_index: 0,
            starter: 0,
            record: TeamRecord::default(),
        };
        team.validate()?;
        Ok(team)
    }

    pub fn with_record(mut self, record: TeamRecord) -> Self {
        self.record = record;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        if self.lineup.is_empty() {
            return Err(RosterError::EmptyLineup { team: self.name.clone() });
        }
        if self.lineup.len() < MIN_LINEUP {
            return Err(RosterError::LineupTooSmall {
                team: self.name.clone(),
                found: self.lineup.len(),
                min: MIN_LINEUP,
            });
        }
        if self.lineup.len() > MAX_LINEUP {
            return Err(RosterError::LineupTooLarge {
                team: self.name.clone(),
                found: self.lineup.len(),
                max: MAX_LINEUP,
            });
        }
        if self.staff.rotation.is_empty() {
            return Err(RosterError::EmptyRotation { team: self.name.clone() });
        }
        Ok(())
    }

    /// Clears every per-game counter and picks the game's starter.
    pub fn reset_for_game(&mut self, innings: u32, game_number: u32) {
        self.score_per_inning = vec![None; innings as usize];
        self.total_runs = 0;
        self.total_hits = 0;
        self.total_errors = 0;
        self.current_batter_index = 0;
        self.starter = self.staff.starter_for_game(game_number).unwrap_or(0);
        for batter in &mut self.lineup {
            batter.reset_game_stats();
        }
        for pitcher in self.staff.iter_mut() {
            pitcher.reset_for_game();
        }
    }

    pub fn starter_slot(&self) -> PitcherSlot {
        PitcherSlot::Starter(self.starter)
    }

    pub fn pitcher(&self, slot: PitcherSlot) -> Option<&Pitcher> {
        self.staff.get(slot)
    }

    pub fn pitcher_mut(&mut self, slot: PitcherSlot) -> Option<&mut Pitcher> {
        self.staff.get_mut(slot)
    }

    /// Slot holding a pitcher of `role`, if the staff has one
    pub fn slot_for_role(&self, role: PitcherRole) -> Option<PitcherSlot> {
        match role {
            PitcherRole::Starter => Some(self.starter_slot()),
            PitcherRole::Reliever => self.staff.reliever.as_ref().map(|_| PitcherSlot::Reliever),
            PitcherRole::Closer => self.staff.closer.as_ref().map(|_| PitcherSlot::Closer),
        }
    }

    /// Advance the batting order, wrapping at the end of the lineup.
    pub fn advance_batter(&mut self) {
        if self.lineup.is_empty() {
            self.current_batter_index = 0;
        } else {
            self.current_batter_index = (self.current_batter_index + 1) % self.lineup.len();
        }
    }

    /// Writes the runs of a finished half into inning `inning` (1-based),
    /// growing the line score for extra innings.
    pub fn record_inning(&mut self, inning: u32, runs: u32) {
        let idx = inning.saturating_sub(1) as usize;
        if self.score_per_inning.len() <= idx {
            self.score_per_inning.resize(idx + 1, None);
        }
        self.score_per_inning[idx] = Some(runs);
    }

    pub fn runs_in_inning(&self, inning: u32) -> u32 {
        let idx = inning.saturating_sub(1) as usize;
        self.score_per_inning.get(idx).copied().flatten().unwrap_or(0)
    }

    /// Adds scored runs to the running inning tally and the total.
    pub fn add_runs(&mut self, inning: u32, runs: u32) {
        if runs == 0 {
            return;
        }
        let current = self.runs_in_inning(inning);
        self.record_inning(inning, current + runs);
        self.total_runs += runs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{BatterAttributes, PitcherAttributes};

    fn pitcher(name: &str, role: PitcherRole) -> Pitcher {
        Pitcher::new(name, role, PitcherAttributes::uniform(5.0), role.default_max_stamina()).unwrap()
    }

    fn sample_team() -> Team {
        let lineup = (1..=9)
            .map(|i| Batter::new(format!("Batter {}", i), BatterAttributes::uniform(5.0)).unwrap())
            .collect();
        let staff = PitchingStaff::new(
            vec![pitcher("Ace", PitcherRole::Starter), pitcher("Deuce", PitcherRole::Starter)],
            Some(pitcher("Long Man", PitcherRole::Reliever)),
            None,
        );
        Team::new("Sluggers", lineup, staff).unwrap()
    }

    fn lineup(size: usize) -> Vec<Batter> {
        (1..=size)
            .map(|i| Batter::new(format!("Batter {}", i), BatterAttributes::uniform(5.0)).unwrap())
            .collect()
    }

    fn one_starter() -> PitchingStaff {
        PitchingStaff::new(vec![pitcher("Ace", PitcherRole::Starter)], None, None)
    }

    #[test]
    fn test_validation_bounds() {
        let bullpen_only = || {
            PitchingStaff::new(
                Vec::new(),
                Some(pitcher("Long Man", PitcherRole::Reliever)),
                Some(pitcher("Shutdown", PitcherRole::Closer)),
            )
        };
        let cases: Vec<(&str, usize, PitchingStaff, Option<RosterError>)> = vec![
            ("empty", 0, one_starter(), Some(RosterError::EmptyLineup { team: "empty".into() })),
            (
                "single",
                1,
                one_starter(),
                Some(RosterError::LineupTooSmall { team: "single".into(), found: 1, min: MIN_LINEUP }),
            ),
            (
                "short",
                MIN_LINEUP - 1,
                one_starter(),
                Some(RosterError::LineupTooSmall {
                    team: "short".into(),
                    found: MIN_LINEUP - 1,
                    min: MIN_LINEUP,
                }),
            ),
            ("minimum", MIN_LINEUP, one_starter(), None),
            ("standard", 9, one_starter(), None),
            ("maximum", MAX_LINEUP, one_starter(), None),
            (
                "crowded",
                MAX_LINEUP + 1,
                one_starter(),
                Some(RosterError::LineupTooLarge {
                    team: "crowded".into(),
                    found: MAX_LINEUP + 1,
                    max: MAX_LINEUP,
                }),
            ),
            (
                "armless",
                9,
                PitchingStaff::new(Vec::new(), None, None),
                Some(RosterError::EmptyRotation { team: "armless".into() }),
            ),
            (
                "bullpen",
                9,
                bullpen_only(),
                Some(RosterError::EmptyRotation { team: "bullpen".into() }),
            ),
        ];

        for (name, size, staff, expected) in cases {
            let result = Team::new(name, lineup(size), staff);
            match expected {
                None => assert!(result.is_ok(), "{} should be valid: {:?}", name, result.err()),
                Some(err) => assert_eq!(result.unwrap_err(), err, "case {}", name),
            }
        }
    }

    #[test]
    fn test_validate_catches_later_edits() {
        let mut team = sample_team();
        team.lineup.truncate(3);
        assert!(matches!(team.validate(), Err(RosterError::LineupTooSmall { found: 3, .. })));
    }

    #[test]
    fn test_rotation_follows_game_number() {
        let mut team = sample_team();
        team.reset_for_game(9, 0);
        assert_eq!(team.starter_slot(), PitcherSlot::Starter(0));
        team.reset_for_game(9, 3);
        assert_eq!(team.starter_slot(), PitcherSlot::Starter(1));
        assert_eq!(team.pitcher(team.starter_slot()).unwrap().name(), "Deuce");
    }

    #[test]
    fn test_batting_order_wraps() {
        let mut team = sample_team();
        for _ in 0..9 {
            team.advance_batter();
        }
        assert_eq!(team.current_batter_index, 0);
        team.advance_batter();
        assert_eq!(team.current_batter_index, 1);
    }

    #[test]
    fn test_line_score_grows_for_extra_innings() {
        let mut team = sample_team();
        team.reset_for_game(9, 0);
        assert_eq!(team.score_per_inning.len(), 9);
        team.add_runs(10, 2);
        assert_eq!(team.score_per_inning.len(), 10);
        assert_eq!(team.runs_in_inning(10), 2);
        assert_eq!(team.total_runs, 2);
        assert_eq!(team.runs_in_inning(4), 0);
    }

    #[test]
    fn test_slot_for_role() {
        let team = sample_team();
        assert_eq!(team.slot_for_role(PitcherRole::Reliever), Some(PitcherSlot::Reliever));
        assert_eq!(team.slot_for_role(PitcherRole::Closer), None);
    }
}
