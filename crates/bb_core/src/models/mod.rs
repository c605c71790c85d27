pub mod events;
pub mod player;
pub mod records;
pub mod team;

pub use events::{AtBatCode, GameNotice, NoticeKind, OutType, Outcome, PlateAppearance};
pub use player::{
    Batter, BatterAttributes, BatterCareer, BattingLine, Pitcher, PitcherAttributes, PitcherCareer,
    PitcherRole, PitchingLine, MAX_ATTRIBUTE,
};
pub use records::{BatterBox, GameSummary, PitcherBox, TeamBox, TeamRecord};
pub use team::{HalfInning, PitcherSlot, PitchingStaff, Team, TeamSide, MAX_LINEUP, MIN_LINEUP};
