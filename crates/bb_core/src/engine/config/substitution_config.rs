//! Bullpen usage configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionConfig {
    /// Closer becomes available from inning `max(1, innings - closer_window)`
    pub closer_window: u32,
    /// Starter may only be pulled for fatigue after this many innings
    pub starter_min_innings: u32,
    /// Candidate must have more than `penalty_threshold_low * max * factor` stamina
    pub candidate_stamina_factor: f64,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self { closer_window: 1, starter_min_innings: 3, candidate_stamina_factor: 0.5 }
    }
}

impl SubstitutionConfig {
    pub fn closer_min_inning(&self, innings: u32) -> u32 {
        innings.saturating_sub(self.closer_window).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closer_min_inning() {
        let cfg = SubstitutionConfig::default();
        assert_eq!(cfg.closer_min_inning(9), 8);
        assert_eq!(cfg.closer_min_inning(1), 1);
    }
}
