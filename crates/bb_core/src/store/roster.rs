//! Roster input shapes and new-game preparation
//!
//! Rosters arrive as JSON with attributes nested under `stats`, e.g.
//!
//! ```json
//! { "id": "AL", "name": "American League All-Stars",
//!   "batters": [ { "name": "Aaron Judge",
//!                  "stats": { "power": 95, "hitRate": 92, "contact": 95, "speed": 65 } } ],
//!   "pitchers": { "startersRotation": [ { "name": "Tarik Skubal",
//!                   "stats": { "power": 92, "velocity": 88, "control": 85,
//!                              "technique": 90, "maxStamina": 1000 } } ],
//!                 "reliever": null, "closer": null } }
//! ```
//!
//! Every rate attribute is required; a missing one is a [`RosterError`].

use serde::{Deserialize, Serialize};

use super::RecordStore;
use crate::error::RosterError;
use crate::models::{
    Batter, BatterAttributes, Pitcher, PitcherAttributes, PitcherRole, PitchingStaff, Team,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterBatterStats {
    pub power: Option<f64>,
    pub hit_rate: Option<f64>,
    pub contact: Option<f64>,
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterBatter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    pub stats: RosterBatterStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterPitcherStats {
    #[serde(default)]
    pub role: Option<PitcherRole>,
    pub power: Option<f64>,
    pub velocity: Option<f64>,
    pub control: Option<f64>,
    pub technique: Option<f64>,
    /// Defaults by role when omitted
    #[serde(default)]
    pub max_stamina: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterPitcher {
    pub name: String,
    pub stats: RosterPitcherStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterStaff {
    #[serde(default, alias = "rotation")]
    pub starters_rotation: Vec<RosterPitcher>,
    /// Single starter, used when no rotation is given
    #[serde(default)]
    pub starter: Option<RosterPitcher>,
    #[serde(default)]
    pub reliever: Option<RosterPitcher>,
    #[serde(default)]
    pub closer: Option<RosterPitcher>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterTeam {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub batters: Vec<RosterBatter>,
    pub pitchers: RosterStaff,
}

impl RosterTeam {
    /// Store key: the id when present, else the name
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

fn require(player: &str, attribute: &'static str, value: Option<f64>) -> Result<f64, RosterError> {
    value.ok_or_else(|| RosterError::MissingAttribute { player: player.to_string(), attribute })
}

impl RosterBatter {
    pub fn build(&self) -> Result<Batter, RosterError> {
        let s = &self.stats;
        let attrs = BatterAttributes::new(
            require(&self.name, "power", s.power)?,
            require(&self.name, "hitRate", s.hit_rate)?,
            require(&self.name, "contact", s.contact)?,
            require(&self.name, "speed", s.speed)?,
        );
        Batter::new(self.name.clone(), attrs)
    }
}

impl RosterPitcher {
    /// `default_role` applies when the stats carry no role.
    pub fn build(&self, default_role: PitcherRole) -> Result<Pitcher, RosterError> {
        let s = &self.stats;
        let role = s.role.unwrap_or(default_role);
        let attrs = PitcherAttributes::new(
            require(&self.name, "power", s.power)?,
            require(&self.name, "velocity", s.velocity)?,
            require(&self.name, "control", s.control)?,
            require(&self.name, "technique", s.technique)?,
        );
        let max_stamina = s.max_stamina.unwrap_or_else(|| role.default_max_stamina());
        Pitcher::new(self.name.clone(), role, attrs, max_stamina)
    }
}

/// Builds a validated team and merges stored career totals and the team's
/// win/loss record into it.
pub fn prepare_team<S: RecordStore + ?Sized>(
    roster: &RosterTeam,
    store: &S,
    team_key: &str,
) -> Result<Team, RosterError> {
    let lineup = roster
        .batters
        .iter()
        .map(|b| -> Result<Batter, RosterError> {
            Ok(b.build()?.with_career(store.batter_career(team_key, &b.name)))
        })
        .collect::<Result<Vec<_>, RosterError>>()?;

    let with_career = |p: &RosterPitcher, role: PitcherRole| -> Result<Pitcher, RosterError> {
        Ok(p.build(role)?.with_career(store.pitcher_career(team_key, &p.name)))
    };

    let staff = &roster.pitchers;
    let mut rotation = staff
        .starters_rotation
        .iter()
        .map(|p| with_career(p, PitcherRole::Starter))
        .collect::<Result<Vec<_>, RosterError>>()?;
    if rotation.is_empty() {
        if let Some(starter) = &staff.starter {
            rotation.push(with_career(starter, PitcherRole::Starter)?);
        }
    }
    let reliever = staff.reliever.as_ref().map(|p| with_career(p, PitcherRole::Reliever)).transpose()?;
    let closer = staff.closer.as_ref().map(|p| with_career(p, PitcherRole::Closer)).transpose()?;

    let team = Team::new(roster.name.clone(), lineup, PitchingStaff::new(rotation, reliever, closer))?;
    Ok(team.with_record(store.team_record(team_key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatterCareer, GameSummary, PitcherCareer, TeamRecord, MIN_LINEUP};
    use crate::store::MemoryStore;

    const ROSTER: &str = r#"{
        "id": "AL",
        "name": "American League All-Stars",
        "batters": [
            { "name": "Aaron Judge", "pos": "RF",
              "stats": { "power": 95, "hitRate": 92, "contact": 95, "speed": 65 } },
            { "name": "Riley Greene",
              "stats": { "power": 74, "hitRate": 78, "contact": 65, "speed": 85 } },
            { "name": "Cal Raleigh", "stats": { "power": 88, "hitRate": 65, "contact": 78, "speed": 45 } },
            { "name": "Vladimir Guerrero Jr.", "stats": { "power": 72, "hitRate": 85, "contact": 88, "speed": 50 } },
            { "name": "Ryan O'Hearn", "stats": { "power": 68, "hitRate": 82, "contact": 85, "speed": 55 } },
            { "name": "Jose Ramirez", "stats": { "power": 80, "hitRate": 80, "contact": 78, "speed": 75 } }
        ],
        "pitchers": {
            "startersRotation": [
                { "name": "Tarik Skubal",
                  "stats": { "role": "Starter", "power": 92, "velocity": 88, "control": 85,
                             "technique": 90, "maxStamina": 1000 } }
            ],
            "reliever": { "name": "AL Reliever",
                          "stats": { "power": 85, "velocity": 90, "control": 80, "technique": 85 } },
            "closer": null
        }
    }"#;

    struct FixedStore;

    impl RecordStore for FixedStore {
        fn team_record(&self, key: &str) -> TeamRecord {
            assert_eq!(key, "AL");
            TeamRecord { wins: 7, losses: 3 }
        }

        fn batter_career(&self, _key: &str, name: &str) -> BatterCareer {
            if name == "Aaron Judge" {
                BatterCareer { career_at_bats: 40, career_hits: 14, ..Default::default() }
            } else {
                BatterCareer::default()
            }
        }

        fn pitcher_career(&self, _key: &str, _name: &str) -> PitcherCareer {
            PitcherCareer { career_wins: 2, ..Default::default() }
        }

        fn commit_game(&mut self, _summary: &GameSummary) -> Result<(), crate::error::StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_prepare_merges_careers() {
        let roster = RosterTeam::from_json_str(ROSTER).unwrap();
        assert_eq!(roster.key(), "AL");
        let team = prepare_team(&roster, &FixedStore, roster.key()).unwrap();

        assert_eq!(team.name(), "American League All-Stars");
        assert_eq!(team.record, TeamRecord { wins: 7, losses: 3 });
        assert_eq!(team.lineup[0].career.career_at_bats, 40);
        assert_eq!(team.lineup[1].career.career_at_bats, 0);
        assert_eq!(team.staff.rotation[0].career.career_wins, 2);
        assert_eq!(team.staff.rotation[0].max_stamina(), 1000.0);
    }

    #[test]
    fn test_reliever_defaults() {
        let roster = RosterTeam::from_json_str(ROSTER).unwrap();
        let team = prepare_team(&roster, &MemoryStore::new(), "AL").unwrap();
        let reliever = team.staff.reliever.as_ref().unwrap();
        assert_eq!(reliever.role(), PitcherRole::Reliever);
        assert_eq!(reliever.max_stamina(), 60.0);
        assert!(team.staff.closer.is_none());
    }

    #[test]
    fn test_missing_attribute_fails_fast() {
        let json = ROSTER.replace(r#""hitRate": 78, "#, "");
        let roster = RosterTeam::from_json_str(&json).unwrap();
        let err = prepare_team(&roster, &MemoryStore::new(), "AL").unwrap_err();
        assert_eq!(
            err,
            RosterError::MissingAttribute { player: "Riley Greene".to_string(), attribute: "hitRate" }
        );
    }

    #[test]
    fn test_single_starter_fallback() {
        let mut roster = RosterTeam::from_json_str(ROSTER).unwrap();
        let ace = roster.pitchers.starters_rotation.remove(0);
        roster.pitchers.starter = Some(ace);
        let team = prepare_team(&roster, &MemoryStore::new(), "AL").unwrap();
        assert_eq!(team.staff.rotation.len(), 1);
        assert_eq!(team.staff.rotation[0].name(), "Tarik Skubal");
    }

    #[test]
    fn test_short_lineup_rejected() {
        let mut roster = RosterTeam::from_json_str(ROSTER).unwrap();
        roster.batters.truncate(MIN_LINEUP - 1);
        let err = prepare_team(&roster, &MemoryStore::new(), "AL").unwrap_err();
        assert_eq!(
            err,
            RosterError::LineupTooSmall {
                team: "American League All-Stars".to_string(),
                found: MIN_LINEUP - 1,
                min: MIN_LINEUP
            }
        );
    }

    #[test]
    fn test_no_pitchers_rejected() {
        let mut roster = RosterTeam::from_json_str(ROSTER).unwrap();
        roster.pitchers.starters_rotation.clear();
        let err = prepare_team(&roster, &MemoryStore::new(), "AL").unwrap_err();
        assert!(matches!(err, RosterError::EmptyRotation { .. }));
    }
}
