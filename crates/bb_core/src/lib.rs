//! # bb_core - Plate-Appearance Baseball Simulation Engine
//!
//! Simulates baseball games one plate appearance at a time from batter and
//! pitcher attribute ratings.
//!
//! ## Features
//! - Outcome probabilities from batter/pitcher matchups, with stamina fatigue
//! - Base-running resolution with speed-dependent extra bases
//! - Inning/half-inning state machine with pitching changes, extra innings
//!   and walk-offs
//! - Deterministic replay (same seed = same game)
//! - JSON API and parallel series simulation
//!
//! ```rust
//! use bb_core::engine::{EngineConfig, GameSession};
//! use bb_core::models::{
//!     Batter, BatterAttributes, Pitcher, PitcherAttributes, PitcherRole, PitchingStaff, Team,
//! };
//!
//! fn club(name: &str) -> Team {
//!     let lineup = (1..=9)
//!         .map(|i| Batter::new(format!("{name} {i}"), BatterAttributes::uniform(5.0)).unwrap())
//!         .collect();
//!     let ace = Pitcher::new(format!("{name} Ace"), PitcherRole::Starter, PitcherAttributes::uniform(5.0), 100.0)
//!         .unwrap();
//!     Team::new(name, lineup, PitchingStaff::new(vec![ace], None, None)).unwrap()
//! }
//!
//! let mut game = GameSession::new(club("Home"), club("Away"), EngineConfig::default(), 42);
//! let summary = game.play_to_end().unwrap();
//! assert!(summary.innings_played >= 9);
//! ```

pub mod analysis;
pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

pub use analysis::{simulate_series, SeriesReport};
pub use api::{simulate_game_json, GameRequest, GameResponse};
pub use engine::{EngineConfig, GameSession};
pub use error::{CoreError, Result};
pub use models::{GameSummary, Team};
pub use store::{prepare_team, MemoryStore, RecordStore, RosterTeam};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
