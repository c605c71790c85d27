use serde::{Deserialize, Serialize};

use super::base_running::Bases;
use crate::models::{HalfInning, PitcherSlot, TeamSide};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    InProgress,
    GameOver,
}

/// Mutable per-game state. Read-only once the phase is `GameOver`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// 1-based
    pub inning: u32,
    pub half: HalfInning,
    pub outs: u32,
    pub bases: Bases,
    /// Lineup slot of the batter due up
    pub active_batter: usize,
    /// Pitcher on the fielding team
    pub active_pitcher: PitcherSlot,
    pub phase: GamePhase,
    /// Set when the game stopped on an unrecoverable lineup defect
    pub fatal_error: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            inning: 1,
            half: HalfInning::Top,
            outs: 0,
            bases: Bases::empty(),
            active_batter: 0,
            active_pitcher: PitcherSlot::Starter(0),
            phase: GamePhase::NotStarted,
            fatal_error: false,
        }
    }
}

impl GameState {
    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == GamePhase::InProgress
    }

    pub fn batting_side(&self) -> TeamSide {
        self.half.batting_side()
    }

    pub fn fielding_side(&self) -> TeamSide {
        self.half.fielding_side()
    }

    /// Clears outs and runners for a new half-inning.
    pub fn reset_half(&mut self) {
        self.outs = 0;
        self.bases.clear();
    }
}
