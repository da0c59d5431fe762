use serde::Serialize;
use thiserror::Error;
use wizard_core::game::config::WizardConfig;
use wizard_core::model::score::RewardMode;

/// Parameters for one simulation run. Game-level ranges are validated by
/// the engine when the runner builds its [`wizard_core::game::WizardGame`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimConfig {
    pub players: usize,
    pub round: usize,
    pub start_player: usize,
    pub reward_mode: RewardMode,
    pub episodes: usize,
    pub seed: u64,
    /// Check resampling consistency every this many applied actions
    /// (0 disables the sweep).
    pub resample_every: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 4,
            round: 1,
            start_player: 0,
            reward_mode: RewardMode::Normal,
            episodes: 100,
            seed: 0,
            resample_every: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.episodes == 0 {
            return Err(SimConfigError::NoEpisodes);
        }
        Ok(())
    }

    pub fn game_config(&self) -> WizardConfig {
        WizardConfig {
            players: self.players,
            round: self.round,
            start_player: self.start_player,
            reward_mode: self.reward_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimConfigError {
    #[error("a run needs at least one episode")]
    NoEpisodes,
}

#[cfg(test)]
mod tests {
    use super::{SimConfig, SimConfigError};

    #[test]
    fn defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_episodes_are_rejected() {
        let config = SimConfig {
            episodes: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::NoEpisodes));
    }

    #[test]
    fn game_config_carries_the_game_parameters() {
        let config = SimConfig {
            players: 5,
            round: 3,
            ..SimConfig::default()
        };
        let game_config = config.game_config();
        assert_eq!(game_config.players, 5);
        assert_eq!(game_config.round, 3);
    }
}
