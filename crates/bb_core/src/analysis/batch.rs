//! Multi-game series simulation
//!
//! Every game runs in its own [`GameSession`] on fresh copies of the two
//! teams, so games are independent and can be spread across the rayon pool.
//! Game `i` uses seed `base_seed + i` and rotation slot `i`.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, GameSession};
use crate::error::Result;
use crate::models::{GameSummary, Team, TeamSide};
use crate::store::NullStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeriesReport {
    pub home: String,
    pub away: String,
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub ties: u32,
    pub avg_home_runs: f64,
    pub avg_away_runs: f64,
    pub avg_innings: f64,
    pub extra_inning_games: u32,
    pub walk_offs: u32,
}

impl SeriesReport {
    pub fn from_summaries(home: &str, away: &str, summaries: &[GameSummary], regulation: u32) -> Self {
        let mut report =
            Self { home: home.to_string(), away: away.to_string(), ..Default::default() };
        if summaries.is_empty() {
            return report;
        }

        let (mut home_runs, mut away_runs, mut innings) = (0u64, 0u64, 0u64);
        for s in summaries {
            match s.winner {
                Some(TeamSide::Home) => report.home_wins += 1,
                Some(TeamSide::Away) => report.away_wins += 1,
                None => report.ties += 1,
            }
            if s.went_extra(regulation) {
                report.extra_inning_games += 1;
            }
            if s.walk_off {
                report.walk_offs += 1;
            }
            home_runs += u64::from(s.home.runs);
            away_runs += u64::from(s.away.runs);
            innings += u64::from(s.innings_played);
        }

        let n = summaries.len() as f64;
        report.games = summaries.len() as u32;
        report.avg_home_runs = home_runs as f64 / n;
        report.avg_away_runs = away_runs as f64 / n;
        report.avg_innings = innings as f64 / n;
        report
    }

    /// Home winning percentage over decided games
    pub fn home_win_pct(&self) -> f64 {
        let decided = self.home_wins + self.away_wins;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.home_wins) / f64::from(decided)
        }
    }
}

/// Plays `games` independent games between the same two teams in parallel.
pub fn simulate_series(
    home: &Team,
    away: &Team,
    config: &EngineConfig,
    base_seed: u64,
    games: u32,
) -> Result<SeriesReport> {
    config.validate()?;
    home.validate()?;
    away.validate()?;

    let summaries = (0..games)
        .into_par_iter()
        .map(|i| {
            GameSession::new(home.clone(), away.clone(), config.clone(), base_seed.wrapping_add(u64::from(i)))
                .with_game_number(i)
                .with_store(NullStore)
                .play_to_end()
        })
        .collect::<Result<Vec<_>>>()?;

    let report = SeriesReport::from_summaries(home.name(), away.name(), &summaries, config.innings);
    info!(
        "Series {} at {}: {} games, {}-{}-{} (W-L-T home)",
        away.name(),
        home.name(),
        report.games,
        report.home_wins,
        report.away_wins,
        report.ties
    );
    Ok(report)
}
