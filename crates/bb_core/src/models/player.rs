//! Batter and pitcher entities
//!
//! Rate attributes are validated once at construction; the engine reads them
//! without fallbacks. Per-game counters live in [`BattingLine`] /
//! [`PitchingLine`] and are reset by game initialization. Career counters
//! are loaded from the record store, absorb each finished game line when the
//! game ends, and are persisted back through the store.

use serde::{Deserialize, Serialize};

use super::events::AtBatCode;
use crate::engine::config::RatingConfig;
use crate::error::RosterError;

/// Upper bound accepted for any rate attribute
pub const MAX_ATTRIBUTE: f64 = 100.0;

fn check_attribute(player: &str, attribute: &'static str, value: f64) -> Result<(), RosterError> {
    if !value.is_finite() || !(0.0..=MAX_ATTRIBUTE).contains(&value) {
        return Err(RosterError::InvalidAttribute { player: player.to_string(), attribute, value });
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), RosterError> {
    if name.trim().is_empty() {
        return Err(RosterError::InvalidName("Name cannot be empty".to_string()));
    }
    if name.len() > 64 {
        return Err(RosterError::InvalidName(format!("Name too long: {}", name)));
    }
    Ok(())
}

// ============================================================================
// Batter
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatterAttributes {
    pub power: f64,
    pub hit_rate: f64,
    pub contact: f64,
    pub speed: f64,
}

impl BatterAttributes {
    pub const fn new(power: f64, hit_rate: f64, contact: f64, speed: f64) -> Self {
        Self { power, hit_rate, contact, speed }
    }

    /// Every attribute at `value`
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Per-game batting counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BattingLine {
    pub at_bats: u32,
    pub hits: u32,
    pub runs_batted_in: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    /// One entry per plate appearance
    pub history: Vec<AtBatCode>,
}

impl BattingLine {
    pub fn plate_appearances(&self) -> usize {
        self.history.len()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatterCareer {
    pub career_at_bats: u32,
    pub career_hits: u32,
    pub career_home_runs: u32,
    pub career_runs_batted_in: u32,
}

impl BatterCareer {
    pub fn absorb(&mut self, line: &BattingLine) {
        self.career_at_bats += line.at_bats;
        self.career_hits += line.hits;
        self.career_home_runs += line.home_runs;
        self.career_runs_batted_in += line.runs_batted_in;
    }

    pub fn batting_average(&self) -> f64 {
        if self.career_at_bats == 0 {
            0.0
        } else {
            self.career_hits as f64 / self.career_at_bats as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batter {
    name: String,
    attributes: BatterAttributes,
    pub game: BattingLine,
    pub career: BatterCareer,
}

impl Batter {
    pub fn new(name: impl Into<String>, attributes: BatterAttributes) -> Result<Self, RosterError> {
        let name = name.into();
        check_name(&name)?;
        check_attribute(&name, "power", attributes.power)?;
        check_attribute(&name, "hitRate", attributes.hit_rate)?;
        check_attribute(&name, "contact", attributes.contact)?;
        check_attribute(&name, "speed", attributes.speed)?;

        Ok(Self { name, attributes, game: BattingLine::default(), career: BatterCareer::default() })
    }

    pub fn with_career(mut self, career: BatterCareer) -> Self {
        self.career = career;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BatterAttributes {
        &self.attributes
    }

    pub fn speed(&self) -> f64 {
        self.attributes.speed
    }

    pub fn reset_game_stats(&mut self) {
        self.game = BattingLine::default();
    }

    /// "H-AB" line, e.g. "2-4"
    pub fn performance_line(&self) -> String {
        format!("{}-{}", self.game.hits, self.game.at_bats)
    }

    pub fn overall(&self, rating: &RatingConfig) -> u8 {
        let w = &rating.batter;
        let a = &self.attributes;
        let score =
            a.power * w.power + a.hit_rate * w.hit_rate + a.contact * w.contact + a.speed * w.speed;
        rating.clamp(score * w.scale + w.base)
    }
}

// ============================================================================
// Pitcher
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PitcherRole {
    Starter,
    Reliever,
    Closer,
}

impl PitcherRole {
    /// Stamina used when a roster omits `maxStamina`
    pub fn default_max_stamina(self) -> f64 {
        match self {
            PitcherRole::Starter => 100.0,
            PitcherRole::Reliever => 60.0,
            PitcherRole::Closer => 40.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PitcherRole::Starter => "starter",
            PitcherRole::Reliever => "reliever",
            PitcherRole::Closer => "closer",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PitcherAttributes {
    pub power: f64,
    pub velocity: f64,
    pub control: f64,
    pub technique: f64,
}

impl PitcherAttributes {
    pub const fn new(power: f64, velocity: f64, control: f64, technique: f64) -> Self {
        Self { power, velocity, control, technique }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Per-game pitching counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchingLine {
    pub batters_faced: u32,
    pub strikeouts: u32,
    pub outs_recorded: u32,
    pub runs_allowed: u32,
    pub hits_allowed: u32,
    pub walks_allowed: u32,
}

impl PitchingLine {
    /// Baseball notation, e.g. 17 outs -> "5.2"
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs_recorded / 3, self.outs_recorded % 3)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PitcherCareer {
    pub career_outs_recorded: u32,
    pub career_runs_allowed: u32,
    pub career_strikeouts: u32,
    pub career_wins: u32,
    pub career_losses: u32,
}

impl PitcherCareer {
    pub fn absorb(&mut self, line: &PitchingLine) {
        self.career_outs_recorded += line.outs_recorded;
        self.career_runs_allowed += line.runs_allowed;
        self.career_strikeouts += line.strikeouts;
    }

    /// Runs allowed per nine innings
    pub fn runs_per_nine(&self) -> f64 {
        if self.career_outs_recorded == 0 {
            0.0
        } else {
            self.career_runs_allowed as f64 * 27.0 / self.career_outs_recorded as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pitcher {
    name: String,
    role: PitcherRole,
    attributes: PitcherAttributes,
    max_stamina: f64,
    current_stamina: f64,
    pub game: PitchingLine,
    pub career: PitcherCareer,
}

impl Pitcher {
    pub fn new(
        name: impl Into<String>,
        role: PitcherRole,
        attributes: PitcherAttributes,
        max_stamina: f64,
    ) -> Result<Self, RosterError> {
        let name = name.into();
        check_name(&name)?;
        check_attribute(&name, "power", attributes.power)?;
        check_attribute(&name, "velocity", attributes.velocity)?;
        check_attribute(&name, "control", attributes.control)?;
        check_attribute(&name, "technique", attributes.technique)?;
        if !max_stamina.is_finite() || max_stamina < 0.0 {
            return Err(RosterError::InvalidStamina { player: name, value: max_stamina });
        }

        Ok(Self {
            name,
            role,
            attributes,
            max_stamina,
            current_stamina: max_stamina,
            game: PitchingLine::default(),
            career: PitcherCareer::default(),
        })
    }

    pub fn with_career(mut self, career: PitcherCareer) -> Self {
        self.career = career;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> PitcherRole {
        self.role
    }

    pub fn attributes(&self) -> &PitcherAttributes {
        &self.attributes
    }

    pub fn max_stamina(&self) -> f64 {
        self.max_stamina
    }

    pub fn current_stamina(&self) -> f64 {
        self.current_stamina
    }

    /// `current / max`, 0 when either is 0
    pub fn stamina_fraction(&self) -> f64 {
        if self.max_stamina <= 0.0 || self.current_stamina <= 0.0 {
            0.0
        } else {
            self.current_stamina / self.max_stamina
        }
    }

    /// Subtract `amount`, floored at 0. Stamina never rises mid-game.
    pub fn drain_stamina(&mut self, amount: f64) {
        if amount > 0.0 {
            self.current_stamina = (self.current_stamina - amount).max(0.0);
        }
    }

    pub fn has_stamina(&self) -> bool {
        self.current_stamina > 0.0
    }

    pub fn reset_for_game(&mut self) {
        self.current_stamina = self.max_stamina;
        self.game = PitchingLine::default();
    }

    pub fn overall(&self, rating: &RatingConfig) -> u8 {
        let w = &rating.pitcher;
        let a = &self.attributes;
        let stamina_score = ((self.max_stamina - 60.0) / 40.0).max(0.0) * (10.0 * w.stamina_effect);
        let score = a.power * w.power
            + a.velocity * w.velocity
            + a.control * w.control
            + a.technique * w.technique
            + stamina_score;
        rating.clamp(score * w.scale + w.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batter_rejects_missing_attribute() {
        let attrs = BatterAttributes::new(5.0, f64::NAN, 5.0, 5.0);
        let err = Batter::new("Nobody", attrs).unwrap_err();
        assert!(matches!(err, RosterError::InvalidAttribute { attribute: "hitRate", .. }));
    }

    #[test]
    fn test_batter_rejects_empty_name() {
        assert!(Batter::new("  ", BatterAttributes::uniform(5.0)).is_err());
    }

    #[test]
    fn test_pitcher_rejects_negative_stamina() {
        let err = Pitcher::new("Arm", PitcherRole::Starter, PitcherAttributes::uniform(5.0), -1.0)
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidStamina { .. }));
    }

    #[test]
    fn test_stamina_drain_floors_at_zero() {
        let mut p =
            Pitcher::new("Arm", PitcherRole::Closer, PitcherAttributes::uniform(5.0), 10.0).unwrap();
        p.drain_stamina(4.5);
        assert!((p.current_stamina() - 5.5).abs() < 1e-12);
        p.drain_stamina(100.0);
        assert_eq!(p.current_stamina(), 0.0);
        assert_eq!(p.stamina_fraction(), 0.0);
        p.reset_for_game();
        assert_eq!(p.current_stamina(), 10.0);
    }

    #[test]
    fn test_zero_max_stamina_fraction() {
        let p = Pitcher::new("Ghost", PitcherRole::Reliever, PitcherAttributes::uniform(5.0), 0.0)
            .unwrap();
        assert_eq!(p.stamina_fraction(), 0.0);
    }

    #[test]
    fn test_overall_ratings_on_classic_scale() {
        let rating = RatingConfig::for_classic_scale();
        let avg = Batter::new("Avg", BatterAttributes::uniform(5.0)).unwrap();
        // 5 * 0.90 * 10 + 2.5 = 47.5 -> 48
        assert_eq!(avg.overall(&rating), 48);

        let star = Batter::new("Star", BatterAttributes::uniform(10.0)).unwrap();
        assert_eq!(star.overall(&rating), 93);

        let weak = Batter::new("Weak", BatterAttributes::uniform(1.0)).unwrap();
        assert_eq!(weak.overall(&rating), rating.min_rating);
    }

    #[test]
    fn test_pitcher_overall_stamina_bonus() {
        let rating = RatingConfig::default();
        let short =
            Pitcher::new("Short", PitcherRole::Closer, PitcherAttributes::uniform(80.0), 40.0)
                .unwrap();
        let long =
            Pitcher::new("Long", PitcherRole::Starter, PitcherAttributes::uniform(80.0), 100.0)
                .unwrap();
        assert!(long.overall(&rating) > short.overall(&rating));
    }

    #[test]
    fn test_innings_pitched_notation() {
        let line = PitchingLine { outs_recorded: 17, ..Default::default() };
        assert_eq!(line.innings_pitched(), "5.2");
    }

    #[test]
    fn test_career_absorb() {
        let mut career = BatterCareer { career_at_bats: 10, career_hits: 3, ..Default::default() };
        let line = BattingLine { at_bats: 4, hits: 2, home_runs: 1, runs_batted_in: 3, ..Default::default() };
        career.absorb(&line);
        assert_eq!(career.career_at_bats, 14);
        assert_eq!(career.career_hits, 5);
        assert_eq!(career.career_home_runs, 1);
        assert_eq!(career.career_runs_batted_in, 3);
        assert!((career.batting_average() - 5.0 / 14.0).abs() < 1e-12);
    }
}
