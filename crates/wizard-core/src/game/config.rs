use crate::model::deck::DECK_SIZE;
use crate::model::round::{MAX_PLAYERS, MIN_PLAYERS};
use crate::model::score::RewardMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game parameters, with the defaults the framework registry advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    pub players: usize,
    pub round: usize,
    pub start_player: usize,
    pub reward_mode: RewardMode,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            players: 4,
            round: 1,
            start_player: 0,
            reward_mode: RewardMode::Normal,
        }
    }
}

impl WizardConfig {
    /// Largest playable round for this player count.
    pub fn max_round(&self) -> usize {
        DECK_SIZE / self.players
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::Players {
                players: self.players,
            });
        }
        if self.round < 1 || self.round > self.max_round() {
            return Err(ConfigError::Round {
                round: self.round,
                max_round: self.max_round(),
            });
        }
        if self.start_player >= self.players {
            return Err(ConfigError::StartPlayer {
                start_player: self.start_player,
                players: self.players,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("players must be between 3 and 6, got {players}")]
    Players { players: usize },
    #[error("round must be between 1 and {max_round}, got {round}")]
    Round { round: usize, max_round: usize },
    #[error("start_player must be below {players}, got {start_player}")]
    StartPlayer { start_player: usize, players: usize },
}
