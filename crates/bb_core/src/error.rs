use thiserror::Error;

/// Roster / entity construction failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid attribute {attribute} for {player}: {value}")]
    InvalidAttribute { player: String, attribute: &'static str, value: f64 },

    #[error("Missing attribute {attribute} for {player}")]
    MissingAttribute { player: String, attribute: &'static str },

    #[error("Invalid max stamina for {player}: {value}")]
    InvalidStamina { player: String, value: f64 },

    #[error("Team {team} has an empty batting lineup")]
    EmptyLineup { team: String },

    #[error("Team {team} has no starting pitcher")]
    EmptyRotation { team: String },

    #[error("Team {team} lineup has {found} batters, at least {min} required")]
    LineupTooSmall { team: String, found: usize, min: usize },
    #[error("Team {team} lineup has {found} batters, at most {max} allowed")]
    LineupTooLarge { team: String, found: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid probability band {name}: min {min} > max {max}")]
    InvertedBand { name: &'static str, min: f64, max: f64 },

    #[error("Probability {name} out of range [0, 1]: {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Neutral baseline must be positive, got {0}")]
    InvalidNeutral(f64),

    #[error("Stamina drain range inverted: min {min} > max {max}")]
    InvertedDrain { min: f64, max: f64 },

    #[error("Stamina penalty thresholds inverted: low {low} > high {high}")]
    InvertedThresholds { low: f64, high: f64 },

    #[error("Config value {name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("Innings per game must be at least 1")]
    NoInnings,

    #[error("Unknown config preset: {0}")]
    UnknownPreset(String),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Unknown team key: {0}")]
    UnknownTeam(String),

    #[error("Store snapshot error: {0}")]
    Snapshot(String),
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::UnknownTeam(_) => true,
            StoreError::Snapshot(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Game did not finish: {0}")]
    Unfinished(String),

    #[error("Game still undecided after {0} plate appearances")]
    PlateAppearanceLimit(usize),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::Deserialization(err.to_string())
        } else {
            CoreError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
