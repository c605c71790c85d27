//! One-way notifications for presentation layers.

use log::info;
use serde::{Deserialize, Serialize};

use crate::models::{GameNotice, TeamSide};

/// Runs scored on the play just resolved
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreChange {
    pub side: TeamSide,
    pub inning: u32,
    pub runs: u32,
}

pub trait NoticeSink {
    fn notice(&mut self, notice: &GameNotice);

    fn score_changed(&mut self, _change: &ScoreChange) {}
}

/// Keeps everything it receives.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub notices: Vec<GameNotice>,
    pub score_changes: Vec<ScoreChange>,
}

impl NoticeSink for CollectingSink {
    fn notice(&mut self, notice: &GameNotice) {
        self.notices.push(notice.clone());
    }

    fn score_changed(&mut self, change: &ScoreChange) {
        self.score_changes.push(*change);
    }
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn notice(&mut self, notice: &GameNotice) {
        info!("[{:?} {}] {}", notice.half, notice.inning, notice.message);
    }
}
