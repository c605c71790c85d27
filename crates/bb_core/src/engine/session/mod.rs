//! Game session: the inning/half-inning state machine.
//!
//! A [`GameSession`] owns one [`GameState`] and both teams for a single
//! game, so independent sessions can run side by side. Each call to
//! [`GameSession::play_next_at_bat`] resolves one plate appearance to
//! completion:
//!
//! 1. resolve the batter due up (fallback to slot 0, else fatal stop)
//! 2. apply the pitching-change policy
//! 3. sample the outcome, resolve base running, apply counters
//! 4. advance the batting order, then walk-off / side change / game end

mod substitutions;


pub use substitutions::{choose_relief, half_inning_pitcher};

use chrono::Utc;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::at_bat::AtBatEngine;
use super::base_running::{self, PlayResolution};
use super::config::EngineConfig;
use super::game_state::{GamePhase, GameState};
use super::notify::{NoticeSink, ScoreChange};
use super::rng::{RandomSource, SeededRandom};
use crate::error::{CoreError, Result};
use crate::models::{
    GameNotice, GameSummary, HalfInning, NoticeKind, Outcome, PlateAppearance, Team, TeamBox,
    TeamSide,
};
use crate::store::{MemoryStore, RecordStore};

/// Plate appearances `play_to_end` will drive before giving up on a game
/// that is still undecided. The game itself stays in progress.
pub const MAX_PLATE_APPEARANCES: usize = 2_000;

/// One resolved plate appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub side: TeamSide,
    pub inning: u32,
    pub appearance: PlateAppearance,
    pub resolution: PlayResolution,
}

pub struct GameSession<S: RecordStore = MemoryStore> {
    config: EngineConfig,
    state: GameState,
    home: Team,
    away: Team,
    home_key: String,
    away_key: String,
    game_number: u32,
    rng: Box<dyn RandomSource + Send>,
    store: S,
    sink: Option<Box<dyn NoticeSink + Send>>,
    notices: Vec<GameNotice>,
    summary: Option<GameSummary>,
    walk_off: bool,
}

impl GameSession<MemoryStore> {
    /// Store keys default to the team names.
    pub fn new(home: Team, away: Team, config: EngineConfig, seed: u64) -> Self {
        let home_key = home.name().to_string();
        let away_key = away.name().to_string();
        Self {
            config,
            state: GameState::default(),
            home,
            away,
            home_key,
            away_key,
            game_number: 0,
            rng: Box::new(SeededRandom::new(seed)),
            store: MemoryStore::default(),
            sink: None,
            notices: Vec::new(),
            summary: None,
            walk_off: false,
        }
    }
}

impl<S: RecordStore> GameSession<S> {
    pub fn with_store<T: RecordStore>(self, store: T) -> GameSession<T> {
        GameSession {
            config: self.config,
            state: self.state,
            home: self.home,
            away: self.away,
            home_key: self.home_key,
            away_key: self.away_key,
            game_number: self.game_number,
            rng: self.rng,
            store,
            sink: self.sink,
            notices: self.notices,
            summary: self.summary,
            walk_off: self.walk_off,
        }
    }

    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_sink(mut self, sink: impl NoticeSink + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Selects each rotation's starter (`game_number % rotation length`).
    pub fn with_game_number(mut self, game_number: u32) -> Self {
        self.game_number = game_number;
        self
    }

    pub fn with_keys(mut self, home_key: impl Into<String>, away_key: impl Into<String>) -> Self {
        self.home_key = home_key.into();
        self.away_key = away_key.into();
        self
    }

    // ========== Accessors ==========

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn notices(&self) -> &[GameNotice] {
        &self.notices
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn into_teams(self) -> (Team, Team) {
        (self.home, self.away)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    // ========== Transitions ==========

    /// Resets every per-game counter and opens the top of the first.
    pub fn initialize_game(&mut self) -> Result<()> {
        self.config.validate()?;
        self.home.validate()?;
        self.away.validate()?;

        let innings = self.config.innings;
        self.home.reset_for_game(innings, self.game_number);
        self.away.reset_for_game(innings, self.game_number);

        self.state = GameState {
            phase: GamePhase::InProgress,
            active_pitcher: self.home.starter_slot(),
            active_batter: self.away.current_batter_index,
            ..GameState::default()
        };
        self.notices.clear();
        self.summary = None;
        self.walk_off = false;

        info!(
            "Game {} started: {} at {} ({} innings)",
            self.game_number,
            self.away.name(),
            self.home.name(),
            innings
        );
        Ok(())
    }

    /// Plays one plate appearance. No-op unless the game is in progress.
    pub fn play_next_at_bat(&mut self) -> Option<PlayResult> {
        if !self.state.is_in_progress() {
            return None;
        }

        let side = self.state.batting_side();
        let Some(batter_slot) = self.resolve_batter(side) else {
            self.fatal_error("Fatal error: batting order invalid. Game stopped.");
            return None;
        };
        self.state.active_batter = batter_slot;

        self.apply_pitching_change();

        let inning = self.state.inning;
        let (batting, fielding) = match side {
            TeamSide::Away => (&mut self.away, &mut self.home),
            TeamSide::Home => (&mut self.home, &mut self.away),
        };
        let pitcher_slot = self.state.active_pitcher;
        let Some(pitcher) = fielding.staff.get_mut(pitcher_slot) else {
            self.fatal_error("Fatal error: pitching staff invalid. Game stopped.");
            return None;
        };

        let engine = AtBatEngine::new(&self.config);
        let appearance = engine.simulate_at_bat(
            &batting.lineup[batter_slot],
            batter_slot,
            pitcher,
            pitcher_slot,
            &mut *self.rng,
        );
        let resolution = base_running::resolve(
            &appearance.outcome,
            batter_slot,
            &self.state.bases,
            &batting.lineup,
            &self.config.speed,
            &mut *self.rng,
        );

        let outcome = appearance.outcome;
        {
            let line = &mut batting.lineup[batter_slot].game;
            line.history.push(outcome.code());
            if outcome.counts_as_at_bat() {
                line.at_bats += 1;
            }
            if outcome.is_hit() {
                line.hits += 1;
            }
            match outcome {
                Outcome::HomeRun => line.home_runs += 1,
                Outcome::Walk => line.walks += 1,
                Outcome::Strikeout => line.strikeouts += 1,
                _ => {}
            }
            line.runs_batted_in += resolution.rbi;
        }
        if outcome.is_hit() {
            batting.total_hits += 1;
        }
        batting.add_runs(inning, resolution.runs);

        pitcher.game.batters_faced += 1;
        pitcher.game.outs_recorded += resolution.outs;
        pitcher.game.runs_allowed += resolution.runs;
        match outcome {
            Outcome::Strikeout => pitcher.game.strikeouts += 1,
            Outcome::Walk => pitcher.game.walks_allowed += 1,
            o if o.is_hit() => pitcher.game.hits_allowed += 1,
            _ => {}
        }

        self.state.outs += resolution.outs;
        self.state.bases = resolution.bases;
        batting.advance_batter();
        self.state.active_batter = batting.current_batter_index;

        debug!(
            "{:?} {} | {} | outs {} | bases {:?}",
            self.state.half,
            inning,
            appearance.description,
            self.state.outs,
            self.state.bases.slots()
        );

        let mut message = appearance.description.clone();
        if resolution.runs > 0 {
            let plural = if resolution.runs > 1 { "s" } else { "" };
            message.push_str(&format!(" ({} run{} scored!)", resolution.runs, plural));
        }
        self.emit(outcome.notice_kind(), message);
        if resolution.runs > 0 {
            let change = ScoreChange { side, inning, runs: resolution.runs };
            if let Some(sink) = self.sink.as_mut() {
                sink.score_changed(&change);
            }
        }

        let innings = self.config.innings;
        if self.state.half == HalfInning::Bottom
            && self.state.inning >= innings
            && self.home.total_runs > self.away.total_runs
        {
            self.walk_off = true;
            let message = format!(
                "{} walk it off with a score of {} - {}!",
                self.home.name(),
                self.home.total_runs,
                self.away.total_runs
            );
            self.end_game(Some(message));
        } else if self.state.outs >= 3 {
            self.change_half_inning();
        }

        // Past regulation with a decided score at the top of a fresh inning
        if !self.state.is_over()
            && self.state.inning > innings
            && self.state.half == HalfInning::Top
            && self.state.outs == 0
            && self.home.total_runs != self.away.total_runs
        {
            self.end_game(None);
        }

        Some(PlayResult { side, inning, appearance, resolution })
    }

    /// Closes the current half-inning and opens the next one, ending the
    /// game when the remaining halves cannot change the result.
    pub fn change_half_inning(&mut self) {
        if !self.state.is_in_progress() {
            return;
        }

        let inning = self.state.inning;
        let batted = self.team_mut(self.state.batting_side());
        let runs = batted.runs_in_inning(inning);
        batted.record_inning(inning, runs);

        self.state.reset_half();
        self.emit(NoticeKind::GameEvent, "Change Side.".to_string());

        let innings = self.config.innings;
        match self.state.half {
            HalfInning::Top => {
                self.state.half = HalfInning::Bottom;
                self.state.active_pitcher =
                    half_inning_pitcher(&self.away, self.state.inning, &self.config);
                self.state.active_batter = self.home.current_batter_index;
                debug!("Bottom of inning {}", inning);

                if inning >= innings && self.home.total_runs > self.away.total_runs {
                    let message = format!(
                        "{} win! No need for bottom of the {}.",
                        self.home.name(),
                        ordinal(inning)
                    );
                    self.end_game(Some(message));
                }
            }
            HalfInning::Bottom => {
                self.state.half = HalfInning::Top;
                self.state.inning += 1;
                if self.state.inning > innings && self.home.total_runs != self.away.total_runs {
                    self.end_game(None);
                    return;
                }
                if self.state.inning > innings {
                    info!("Tied after {} innings, playing inning {}", inning, self.state.inning);
                }
                self.state.active_pitcher =
                    half_inning_pitcher(&self.home, self.state.inning, &self.config);
                self.state.active_batter = self.away.current_batter_index;
                debug!("Top of inning {}", self.state.inning);
            }
        }
    }

    /// Terminal transition. Decides the winner, credits records, hands the
    /// summary to the store. A second call is a silent no-op.
    pub fn end_game(&mut self, custom_message: Option<String>) -> Option<&GameSummary> {
        if !self.state.is_in_progress() {
            return None;
        }
        self.state.phase = GamePhase::GameOver;

        let (home_runs, away_runs) = (self.home.total_runs, self.away.total_runs);
        let winner = if home_runs > away_runs {
            Some(TeamSide::Home)
        } else if away_runs > home_runs {
            Some(TeamSide::Away)
        } else {
            None
        };
        let innings_played = self.innings_played();

        let message = custom_message.unwrap_or_else(|| match winner {
            Some(TeamSide::Home) => format!("{} win {} - {}!", self.home.name(), home_runs, away_runs),
            Some(TeamSide::Away) => format!("{} win {} - {}!", self.away.name(), away_runs, home_runs),
            None => format!("It's a TIE after {} innings! {} - {}.", innings_played, home_runs, away_runs),
        });

        let mut winning_pitcher = None;
        let mut losing_pitcher = None;
        if let Some(side) = winner {
            let (won, lost) = match side {
                TeamSide::Home => (&mut self.home, &mut self.away),
                TeamSide::Away => (&mut self.away, &mut self.home),
            };
            won.record.wins += 1;
            lost.record.losses += 1;
            let (won_slot, lost_slot) = (won.starter_slot(), lost.starter_slot());
            if let Some(p) = won.pitcher_mut(won_slot) {
                p.career.career_wins += 1;
                winning_pitcher = Some(p.name().to_string());
            }
            if let Some(p) = lost.pitcher_mut(lost_slot) {
                p.career.career_losses += 1;
                losing_pitcher = Some(p.name().to_string());
            }
        }

        for team in [&mut self.home, &mut self.away] {
            for batter in &mut team.lineup {
                let line = batter.game.clone();
                batter.career.absorb(&line);
            }
            for pitcher in team.staff.iter_mut() {
                let line = pitcher.game;
                pitcher.career.absorb(&line);
            }
        }

        let summary = GameSummary {
            game_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            game_number: self.game_number,
            innings_played,
            home_key: self.home_key.clone(),
            away_key: self.away_key.clone(),
            home: TeamBox::from_team(&self.home),
            away: TeamBox::from_team(&self.away),
            winner,
            winning_pitcher,
            losing_pitcher,
            walk_off: self.walk_off,
            message: message.clone(),
        };

        if let Err(e) = self.store.commit_game(&summary) {
            warn!("Failed to record game {}: {}", summary.game_id, e);
        }

        info!("Game {} over: {}", self.game_number, message);
        self.emit(NoticeKind::GameOver, format!("GAME OVER! {}", message));
        self.summary = Some(summary);
        self.summary.as_ref()
    }

    /// Initializes if needed and plays until the game ends.
    ///
    /// Returns [`CoreError::PlateAppearanceLimit`] if the game is still
    /// undecided after [`MAX_PLATE_APPEARANCES`] calls; the session is left
    /// in progress and can be driven further with `play_next_at_bat`.
    pub fn play_to_end(&mut self) -> Result<GameSummary> {
        if !self.state.is_started() {
            self.initialize_game()?;
        }

        let mut plate_appearances = 0;
        while self.state.is_in_progress() {
            if plate_appearances >= MAX_PLATE_APPEARANCES {
                warn!(
                    "Game {} undecided after {} plate appearances (inning {})",
                    self.game_number, plate_appearances, self.state.inning
                );
                return Err(CoreError::PlateAppearanceLimit(plate_appearances));
            }
            self.play_next_at_bat();
            plate_appearances += 1;
        }

        self.summary.clone().ok_or_else(|| {
            let reason = self
                .notices
                .last()
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "game stopped without a result".to_string());
            CoreError::Unfinished(reason)
        })
    }

    // ========== Internals ==========

    fn resolve_batter(&mut self, side: TeamSide) -> Option<usize> {
        let team = self.team_mut(side);
        if team.current_batter_index < team.lineup.len() {
            return Some(team.current_batter_index);
        }
        warn!(
            "{} has no batter at slot {}, resetting to the top of the order",
            team.name(),
            team.current_batter_index
        );
        team.current_batter_index = 0;
        if team.lineup.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn fatal_error(&mut self, message: &str) {
        error!("{}", message);
        self.state.phase = GamePhase::GameOver;
        self.state.fatal_error = true;
        self.emit(NoticeKind::GameError, message.to_string());
    }

    /// Innings with at least one half played
    fn innings_played(&self) -> u32 {
        let fresh_top = self.state.half == HalfInning::Top && self.state.outs == 0;
        if fresh_top && self.state.inning > 1 {
            self.state.inning - 1
        } else {
            self.state.inning
        }
    }

    fn emit(&mut self, kind: NoticeKind, message: String) {
        let notice = GameNotice { kind, message, inning: self.state.inning, half: self.state.half };
        if let Some(sink) = self.sink.as_mut() {
            sink.notice(&notice);
        }
        self.notices.push(notice);
    }
}

/// 1 -> "1st", 9 -> "9th", 12 -> "12th"
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
