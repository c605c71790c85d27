//! Pitching change policy
//!
//! - choose_relief: per plate appearance, stamina-driven relief choice
//! - half_inning_pitcher: pitcher taking the mound at a side change
//! - apply_pitching_change: commits a relief choice on the session

use log::info;

use super::GameSession;
use crate::engine::config::EngineConfig;
use crate::models::{NoticeKind, PitcherRole, PitcherSlot, Team};
use crate::store::RecordStore;

/// Relief candidate for the pitcher in `current`, if the policy calls for one.
///
/// Below the low stamina threshold anyone but the closer is relieved: by the
/// closer once the late-inning window opens, otherwise by the reliever.
/// Below the high threshold a starter is relieved by the reliever after the
/// minimum innings. The candidate must itself have enough stamina left.
pub fn choose_relief(
    team: &Team,
    current: PitcherSlot,
    inning: u32,
    config: &EngineConfig,
) -> Option<PitcherSlot> {
    let pitcher = team.pitcher(current)?;
    let stamina = &config.stamina;
    let policy = &config.substitution;
    let fraction = pitcher.stamina_fraction();

    let candidate = if fraction < stamina.penalty_threshold_low && pitcher.role() != PitcherRole::Closer
    {
        if inning >= policy.closer_min_inning(config.innings) && team.staff.closer.is_some() {
            Some(PitcherSlot::Closer)
        } else {
            team.slot_for_role(PitcherRole::Reliever)
        }
    } else if fraction < stamina.penalty_threshold_high
        && pitcher.role() == PitcherRole::Starter
        && inning > policy.starter_min_innings
    {
        team.slot_for_role(PitcherRole::Reliever)
    } else {
        None
    };

    let slot = candidate.filter(|slot| *slot != current)?;
    let relief = team.pitcher(slot)?;
    let required = stamina.penalty_threshold_low * relief.max_stamina() * policy.candidate_stamina_factor;
    (relief.current_stamina() > required).then_some(slot)
}

/// The starter goes back out unless the minimum innings have passed and the
/// starter is below the high stamina threshold; then the reliever takes
/// over (or the starter again if there is none).
pub fn half_inning_pitcher(team: &Team, inning: u32, config: &EngineConfig) -> PitcherSlot {
    let starter = team.starter_slot();
    let tired = team.pitcher(starter).is_some_and(|p| {
        p.current_stamina() < config.stamina.penalty_threshold_high * p.max_stamina()
    });
    if inning > config.substitution.starter_min_innings && tired {
        team.slot_for_role(PitcherRole::Reliever).unwrap_or(starter)
    } else {
        starter
    }
}

impl<S: RecordStore> GameSession<S> {
    pub(crate) fn apply_pitching_change(&mut self) {
        let side = self.state.fielding_side();
        let team = self.team(side);
        let Some(slot) = choose_relief(team, self.state.active_pitcher, self.state.inning, &self.config)
        else {
            return;
        };
        let Some(relief) = team.pitcher(slot) else {
            return;
        };

        let message =
            format!("{} brings in {} {}.", team.name(), relief.role().label(), relief.name());
        info!("Pitching change in inning {}: {}", self.state.inning, message);
        self.state.active_pitcher = slot;
        self.emit(NoticeKind::GameEvent, message);
    }
}
