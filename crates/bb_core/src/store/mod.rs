//! Career and win/loss record persistence
//!
//! The engine only depends on [`RecordStore`]. Reads of unknown teams or
//! players return zeroed records; writes happen once per finished game via
//! [`RecordStore::commit_game`].

pub mod roster;

pub use roster::{prepare_team, RosterBatter, RosterPitcher, RosterStaff, RosterTeam};

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{BatterCareer, GameSummary, PitcherCareer, TeamRecord, TeamSide};

pub trait RecordStore {
    fn team_record(&self, team_key: &str) -> TeamRecord;

    fn batter_career(&self, team_key: &str, name: &str) -> BatterCareer;

    fn pitcher_career(&self, team_key: &str, name: &str) -> PitcherCareer;

    /// Folds a finished game into the stored totals.
    fn commit_game(&mut self, summary: &GameSummary) -> Result<(), StoreError>;
}

/// Everything stored for one team.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamEntry {
    pub record: TeamRecord,
    #[serde(default)]
    pub batters: HashMap<String, BatterCareer>,
    #[serde(default)]
    pub pitchers: HashMap<String, PitcherCareer>,
}

/// In-memory store with a JSON snapshot format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryStore {
    teams: HashMap<String, TeamEntry>,
    games_recorded: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(&self, team_key: &str) -> Result<&TeamEntry, StoreError> {
        self.teams.get(team_key).ok_or_else(|| StoreError::UnknownTeam(team_key.to_string()))
    }

    pub fn team_keys(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn games_recorded(&self) -> u64 {
        self.games_recorded
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    pub fn from_json(input: &str) -> Result<Self, StoreError> {
        serde_json::from_str(input).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    fn entry(&mut self, team_key: &str) -> &mut TeamEntry {
        self.teams.entry(team_key.to_string()).or_default()
    }
}

impl RecordStore for MemoryStore {
    fn team_record(&self, team_key: &str) -> TeamRecord {
        self.teams.get(team_key).map(|t| t.record).unwrap_or_default()
    }

    fn batter_career(&self, team_key: &str, name: &str) -> BatterCareer {
        self.teams
            .get(team_key)
            .and_then(|t| t.batters.get(name))
            .copied()
            .unwrap_or_default()
    }

    fn pitcher_career(&self, team_key: &str, name: &str) -> PitcherCareer {
        self.teams
            .get(team_key)
            .and_then(|t| t.pitchers.get(name))
            .copied()
            .unwrap_or_default()
    }

    fn commit_game(&mut self, summary: &GameSummary) -> Result<(), StoreError> {
        for side in [TeamSide::Home, TeamSide::Away] {
            let team_box = summary.team(side);
            let entry = self.entry(summary.key(side));

            for batter in &team_box.batters {
                entry.batters.entry(batter.name.clone()).or_default().absorb(&batter.line);
            }
            for pitcher in &team_box.pitchers {
                entry.pitchers.entry(pitcher.name.clone()).or_default().absorb(&pitcher.line);
            }

            match summary.winner {
                Some(winner) if winner == side => {
                    entry.record.wins += 1;
                    entry.pitchers.entry(team_box.starter.clone()).or_default().career_wins += 1;
                }
                Some(_) => {
                    entry.record.losses += 1;
                    entry.pitchers.entry(team_box.starter.clone()).or_default().career_losses += 1;
                }
                None => {}
            }
        }

        self.games_recorded += 1;
        debug!(
            "Recorded game {} ({} vs {}), {} games stored",
            summary.game_id, summary.away_key, summary.home_key, self.games_recorded
        );
        Ok(())
    }
}

/// Reads nothing, keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl RecordStore for NullStore {
    fn team_record(&self, _team_key: &str) -> TeamRecord {
        TeamRecord::default()
    }

    fn batter_career(&self, _team_key: &str, _name: &str) -> BatterCareer {
        BatterCareer::default()
    }

    fn pitcher_career(&self, _team_key: &str, _name: &str) -> PitcherCareer {
        PitcherCareer::default()
    }

    fn commit_game(&mut self, _summary: &GameSummary) -> Result<(), StoreError> {
        Ok(())
    }
}
