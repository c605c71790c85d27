//! Post-game analysis over many simulated games.

pub mod batch;

pub use batch::{simulate_series, SeriesReport};
