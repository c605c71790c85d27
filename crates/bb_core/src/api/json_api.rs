//! JSON entry point: one request in, one finished game out.

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, GameSession, GameState};
use crate::error::{CoreError, Result};
use crate::models::{GameNotice, GameSummary};
use crate::store::{prepare_team, MemoryStore, RosterTeam};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Picks each rotation's starter
    #[serde(default)]
    pub game_number: u32,
    /// "classic" or "wide_scale"; ignored when `config` is present
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    pub home: RosterTeam,
    pub away: RosterTeam,
    /// Prior records to merge into the rosters and update
    #[serde(default)]
    pub records: Option<MemoryStore>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub summary: GameSummary,
    pub notices: Vec<GameNotice>,
    pub state: GameState,
    pub records: MemoryStore,
}

impl GameRequest {
    fn engine_config(&self) -> Result<EngineConfig> {
        let config = match (&self.config, &self.preset) {
            (Some(config), _) => config.clone(),
            (None, Some(preset)) => EngineConfig::from_preset(preset)?,
            (None, None) => EngineConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Simulates one full game described by `request_json`.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let response = simulate_game(request)?;
    serde_json::to_string(&response).map_err(|e| CoreError::Serialization(e.to_string()))
}

pub fn simulate_game(request: GameRequest) -> Result<GameResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::UnsupportedSchema(request.schema_version));
    }

    let config = request.engine_config()?;
    let store = request.records.unwrap_or_default();
    let home_key = request.home.key().to_string();
    let away_key = request.away.key().to_string();
    let home = prepare_team(&request.home, &store, &home_key)?;
    let away = prepare_team(&request.away, &store, &away_key)?;

    info!(
        "JSON game request: {} at {}, seed {}, game {}",
        away_key, home_key, request.seed, request.game_number
    );

    let mut session = GameSession::new(home, away, config, request.seed)
        .with_game_number(request.game_number)
        .with_keys(home_key, away_key)
        .with_store(store);
    let summary = session.play_to_end()?;

    Ok(GameResponse {
        schema_version: SCHEMA_VERSION,
        summary,
        notices: session.notices().to_vec(),
        state: session.state().clone(),
        records: session.into_store(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use serde_json::{json, Value};

    fn roster(id: &str) -> Value {
        let batters: Vec<Value> = (1..=9)
            .map(|i| {
                json!({
                    "name": format!("{} Batter {}", id, i),
                    "stats": { "power": 5, "hitRate": 6, "contact": 5, "speed": 4 + (i % 5) }
                })
            })
            .collect();
        let arm = |name: &str| {
            json!({ "name": format!("{} {}", id, name),
                    "stats": { "power": 6, "velocity": 6, "control": 5, "technique": 5 } })
        };
        json!({
            "id": id,
            "name": format!("{} Club", id),
            "batters": batters,
            "pitchers": {
                "startersRotation": [arm("Ace"), arm("Two")],
                "reliever": arm("Setup"),
                "closer": arm("Closer")
            }
        })
    }

    fn request(seed: u64) -> Value {
        json!({ "schema_version": 1, "seed": seed, "home": roster("HOM"), "away": roster("AWY") })
    }

    #[test]
    fn test_simulate_game_json() {
        let out = simulate_game_json(&request(7).to_string()).unwrap();
        let response: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(response["schema_version"], 1);
        assert_eq!(response["state"]["phase"], "game_over");
        assert_eq!(response["summary"]["home_key"], "HOM");
        assert_eq!(response["summary"]["home"]["name"], "HOM Club");
        let notices = response["notices"].as_array().unwrap();
        assert_eq!(notices.last().unwrap()["kind"], "GAME_OVER");
    }

    #[test]
    fn test_same_request_same_game() {
        let a: Value = serde_json::from_str(&simulate_game_json(&request(11).to_string()).unwrap()).unwrap();
        let b: Value = serde_json::from_str(&simulate_game_json(&request(11).to_string()).unwrap()).unwrap();
        assert_eq!(a["notices"], b["notices"]);
        assert_eq!(a["summary"]["home"]["line_score"], b["summary"]["home"]["line_score"]);
    }

    #[test]
    fn test_records_are_carried_forward() {
        let first = simulate_game(serde_json::from_value(request(3)).unwrap()).unwrap();
        assert_eq!(first.records.games_recorded(), 1);

        let mut next = request(4);
        next["records"] = serde_json::to_value(&first.records).unwrap();
        next["game_number"] = json!(1);
        let second = simulate_game(serde_json::from_value(next).unwrap()).unwrap();

        assert_eq!(second.records.games_recorded(), 2);
        let games = second.records.team_record("HOM").games() + second.records.team_record("AWY").games();
        // Ties leave records untouched
        let decided = [&first.summary, &second.summary].iter().filter(|s| !s.is_tie()).count() as u32;
        assert_eq!(games, 2 * decided);
        assert_eq!(second.summary.home.starter, "HOM Two");
    }

    #[test]
    fn test_unsupported_schema() {
        let mut req = request(1);
        req["schema_version"] = json!(2);
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedSchema(2)));
    }

    #[test]
    fn test_unknown_preset() {
        let mut req = request(1);
        req["preset"] = json!("little_league");
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_malformed_roster() {
        let mut req = request(1);
        req["home"]["batters"][0]["stats"] = json!({ "power": 5 });
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::Roster(_)));

        assert!(matches!(simulate_game_json("{"), Err(CoreError::Deserialization(_))));
    }
}
