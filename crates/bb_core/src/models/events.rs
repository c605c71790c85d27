use serde::{Deserialize, Serialize};

use super::team::PitcherSlot;

/// Flavour text for a ball put in play for an out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OutType {
    #[default]
    GroundsOut,
    FliesOut,
    LinesOut,
    PopsUp,
}

impl OutType {
    pub const ALL: [OutType; 4] =
        [OutType::GroundsOut, OutType::FliesOut, OutType::LinesOut, OutType::PopsUp];

    pub fn describe(self) -> &'static str {
        match self {
            OutType::GroundsOut => "Grounds Out",
            OutType::FliesOut => "Flies Out",
            OutType::LinesOut => "Lines Out",
            OutType::PopsUp => "Pops Up",
        }
    }
}

/// Result of one plate appearance.
///
/// Outs carry no advancement; every other variant advances the batter a
/// fixed number of bases (see [`Outcome::bases_advanced`]).
/// `Triple` is part of the taxonomy and fully handled downstream, but the
/// at-bat sampler never produces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Strikeout,
    Out { out_type: OutType },
    Walk,
    Single,
    Double,
    Triple,
    #[serde(rename = "HOMERUN")]
    HomeRun,
}

impl Outcome {
    /// Bases the batter is awarded; 0 for outs
    pub fn bases_advanced(&self) -> u8 {
        match self {
            Outcome::Strikeout | Outcome::Out { .. } => 0,
            Outcome::Walk | Outcome::Single => 1,
            Outcome::Double => 2,
            Outcome::Triple => 3,
            Outcome::HomeRun => 4,
        }
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Outcome::Strikeout | Outcome::Out { .. })
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Single | Outcome::Double | Outcome::Triple | Outcome::HomeRun)
    }

    /// Walks are plate appearances but not official at-bats
    pub fn counts_as_at_bat(&self) -> bool {
        !matches!(self, Outcome::Walk)
    }

    pub fn code(&self) -> AtBatCode {
        match self {
            Outcome::Strikeout => AtBatCode::Strikeout,
            Outcome::Out { .. } => AtBatCode::Out,
            Outcome::Walk => AtBatCode::Walk,
            Outcome::Single => AtBatCode::Single,
            Outcome::Double => AtBatCode::Double,
            Outcome::Triple => AtBatCode::Triple,
            Outcome::HomeRun => AtBatCode::HomeRun,
        }
    }

    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            Outcome::Strikeout => NoticeKind::Strikeout,
            Outcome::Out { .. } => NoticeKind::Out,
            Outcome::Walk => NoticeKind::Walk,
            Outcome::Single => NoticeKind::Single,
            Outcome::Double => NoticeKind::Double,
            Outcome::Triple => NoticeKind::Triple,
            Outcome::HomeRun => NoticeKind::Homerun,
        }
    }

    pub fn describe(&self, batter_name: &str) -> String {
        match self {
            Outcome::Strikeout => format!("{} STRIKES OUT!", batter_name),
            Outcome::Out { out_type } => format!("{} {}.", batter_name, out_type.describe()),
            Outcome::Walk => format!("{} draws a WALK.", batter_name),
            Outcome::Single => format!("{} hits a SINGLE!", batter_name),
            Outcome::Double => format!("{} hits a DOUBLE!", batter_name),
            Outcome::Triple => format!("{} hits a TRIPLE!", batter_name),
            Outcome::HomeRun => format!("HOME RUN for {}!!", batter_name),
        }
    }
}

/// Scorebook code stored in a batter's plate-appearance history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AtBatCode {
    #[serde(rename = "K")]
    Strikeout,
    #[serde(rename = "BB")]
    Walk,
    #[serde(rename = "1B")]
    Single,
    #[serde(rename = "2B")]
    Double,
    #[serde(rename = "3B")]
    Triple,
    #[serde(rename = "HR")]
    HomeRun,
    #[serde(rename = "OUT")]
    Out,
}

impl AtBatCode {
    pub fn as_str(self) -> &'static str {
        match self {
            AtBatCode::Strikeout => "K",
            AtBatCode::Walk => "BB",
            AtBatCode::Single => "1B",
            AtBatCode::Double => "2B",
            AtBatCode::Triple => "3B",
            AtBatCode::HomeRun => "HR",
            AtBatCode::Out => "OUT",
        }
    }
}

/// One sampled plate appearance, before base running is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlateAppearance {
    pub outcome: Outcome,
    pub description: String,
    /// Lineup slot of the batter on the batting team
    pub batter_slot: usize,
    /// Pitcher on the fielding team
    pub pitcher: PitcherSlot,
}

impl PlateAppearance {
    pub fn bases_advanced(&self) -> u8 {
        self.outcome.bases_advanced()
    }
}

/// Category tag for presentation layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Strikeout,
    Walk,
    Homerun,
    Single,
    Double,
    Triple,
    Out,
    GameEvent,
    GameOver,
    GameError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameNotice {
    pub kind: NoticeKind,
    pub message: String,
    pub inning: u32,
    pub half: super::HalfInning,
}
