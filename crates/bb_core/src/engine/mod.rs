//! Simulation engine
//!
//! - `probability` / `at_bat`: outcome rates and one plate appearance
//! - `base_running`: runner advancement for a resolved outcome
//! - `session`: the inning/half-inning state machine for a whole game

pub mod at_bat;
pub mod base_running;
pub mod config;
pub mod game_state;
pub mod notify;
pub mod probability;
pub mod probability_validator;
pub mod rng;
pub mod session;

pub use at_bat::AtBatEngine;
pub use base_running::{resolve, Bases, PlayResolution};
pub use config::EngineConfig;
pub use game_state::{GamePhase, GameState};
pub use notify::{CollectingSink, LogSink, NoticeSink, ScoreChange};
pub use probability::{OutcomeRates, PitcherEffectiveness, RateBucket};
pub use probability_validator::{DistributionError, ProbabilityValidator};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use session::{
    choose_relief, half_inning_pitcher, GameSession, PlayResult, MAX_PLATE_APPEARANCES,
};
