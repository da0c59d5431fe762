use crate::framework::{Action, State};
use crate::model::round::RoundError;
use core::fmt;
use serde::{Deserialize, Serialize};

use super::config::WizardConfig;
use super::state::WizardState;
use super::WizardGame;

/// Replayable record of a state: the game parameters plus every action
/// taken, labeled with the actor's integer id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub config: WizardConfig,
    pub history: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub player: i32,
    pub action: Action,
}

impl StateSnapshot {
    pub fn capture(state: &WizardState<'_>) -> Self {
        Self {
            config: *state.game().config(),
            history: state
                .history()
                .iter()
                .map(|&(player, action)| SnapshotEntry {
                    player: player.id(),
                    action,
                })
                .collect(),
        }
    }

    /// Rebuild the state by replaying the recorded actions on `game`, which
    /// must carry the same parameters the snapshot was captured under.
    pub fn restore<'g>(&self, game: &'g WizardGame) -> Result<WizardState<'g>, RestoreError> {
        if *game.config() != self.config {
            return Err(RestoreError::ConfigMismatch {
                expected: self.config,
                found: *game.config(),
            });
        }
        let mut state = game.new_initial_state();
        for entry in &self.history {
            let expected = state.current_player().id();
            if entry.player != expected {
                return Err(RestoreError::ActorMismatch {
                    recorded: entry.player,
                    expected,
                });
            }
            state.apply_action(entry.action)?;
        }
        Ok(state)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreError {
    ConfigMismatch {
        expected: WizardConfig,
        found: WizardConfig,
    },
    ActorMismatch {
        recorded: i32,
        expected: i32,
    },
    Replay(RoundError),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::ConfigMismatch { expected, found } => write!(
                f,
                "snapshot was captured under {expected:?} but the game has {found:?}"
            ),
            RestoreError::ActorMismatch { recorded, expected } => write!(
                f,
                "snapshot records actor {recorded} where the replay expects {expected}"
            ),
            RestoreError::Replay(err) => write!(f, "replaying the snapshot failed: {err}"),
        }
    }
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RestoreError::Replay(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RoundError> for RestoreError {
    fn from(err: RoundError) -> Self {
        RestoreError::Replay(err)
    }
}
