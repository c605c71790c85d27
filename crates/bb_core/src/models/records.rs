//! Game Result Data Structures
//!
//! [`GameSummary`] is the box score produced when a game ends. It is the
//! only thing the record store reads when folding a finished game into
//! career and win/loss totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::{Batter, BattingLine, Pitcher, PitcherRole, PitchingLine};
use super::team::{PitcherSlot, Team, TeamSide};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_pct(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.games() as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatterBox {
    pub name: String,
    pub line: BattingLine,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitcherBox {
    pub name: String,
    pub role: PitcherRole,
    pub slot: PitcherSlot,
    pub line: PitchingLine,
}

/// One side of the box score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamBox {
    pub name: String,
    pub line_score: Vec<Option<u32>>,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub batters: Vec<BatterBox>,
    /// Only pitchers that faced at least one batter
    pub pitchers: Vec<PitcherBox>,
    pub starter: String,
}

impl TeamBox {
    pub fn from_team(team: &Team) -> Self {
        let batters = team.lineup.iter().map(batter_box).collect();
        let pitchers = team
            .staff
            .iter()
            .filter(|(_, p)| p.game.batters_faced > 0)
            .map(|(slot, p)| pitcher_box(slot, p))
            .collect();
        let starter = team.pitcher(team.starter_slot()).map(|p| p.name().to_string()).unwrap_or_default();

        Self {
            name: team.name().to_string(),
            line_score: team.score_per_inning.clone(),
            runs: team.total_runs,
            hits: team.total_hits,
            errors: team.total_errors,
            batters,
            pitchers,
            starter,
        }
    }
}

fn batter_box(batter: &Batter) -> BatterBox {
    BatterBox { name: batter.name().to_string(), line: batter.game.clone() }
}

fn pitcher_box(slot: PitcherSlot, pitcher: &Pitcher) -> PitcherBox {
    PitcherBox { name: pitcher.name().to_string(), role: pitcher.role(), slot, line: pitcher.game }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSummary {
    pub game_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub game_number: u32,
    pub innings_played: u32,
    pub home_key: String,
    pub away_key: String,
    pub home: TeamBox,
    pub away: TeamBox,
    /// `None` on a tie
    pub winner: Option<TeamSide>,
    pub winning_pitcher: Option<String>,
    pub losing_pitcher: Option<String>,
    pub walk_off: bool,
    pub message: String,
}

impl GameSummary {
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    pub fn team(&self, side: TeamSide) -> &TeamBox {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn key(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_key,
            TeamSide::Away => &self.away_key,
        }
    }

    pub fn went_extra(&self, regulation: u32) -> bool {
        self.innings_played > regulation
    }

    /// "R H E" line for one side
    pub fn rhe(&self, side: TeamSide) -> String {
        let t = self.team(side);
        format!("{} {} {}", t.runs, t.hits, t.errors)
    }
}
