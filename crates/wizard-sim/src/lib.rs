#![deny(warnings)]
//! Deterministic random-playout harness for the Wizard engine. Episodes are
//! driven to terminal with chance sampled by probability and players acting
//! uniformly over their legal actions; the engine's bookkeeping invariants
//! are checked at every step and any violation fails the run.

pub mod config;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{event, Level};
use wizard_core::framework::{Action, Game, PlayerId, State};
use wizard_core::game::config::ConfigError;
use wizard_core::game::state::WizardState;
use wizard_core::game::WizardGame;
use wizard_core::model::deck::DECK_SIZE;
use wizard_core::model::round::RoundError;

use config::{SimConfig, SimConfigError};

/// Drives seeded episodes against one game configuration.
pub struct SimRunner {
    config: SimConfig,
    game: WizardGame,
}

/// One JSONL row of output.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub moves: usize,
    pub returns: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub config: SimConfig,
    pub mean_returns: Vec<f64>,
    pub episodes: Vec<EpisodeRecord>,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let game = WizardGame::new(config.game_config())?;
        Ok(Self { config, game })
    }

    pub fn game(&self) -> &WizardGame {
        &self.game
    }

    pub fn run(&self) -> Result<SimReport, SimError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut totals = vec![0.0; self.game.num_players()];
        let mut episodes = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let record = self.run_episode(&mut rng, episode)?;
            for (total, value) in totals.iter_mut().zip(&record.returns) {
                *total += value;
            }
            if tracing::enabled!(Level::DEBUG) {
                event!(
                    Level::DEBUG,
                    episode,
                    moves = record.moves,
                    "episode finished"
                );
            }
            episodes.push(record);
        }
        let mean_returns = totals
            .into_iter()
            .map(|total| total / self.config.episodes as f64)
            .collect();
        Ok(SimReport {
            config: self.config,
            mean_returns,
            episodes,
        })
    }

    fn run_episode(&self, rng: &mut StdRng, episode: usize) -> Result<EpisodeRecord, SimError> {
        let mut state = self.game.new_initial_state();
        let mut moves = 0;
        while !state.is_terminal() {
            check_conservation(&state)?;
            let action = match state.current_player() {
                PlayerId::Chance => sample_chance(&state, rng),
                PlayerId::Player(_) => {
                    let actions = state.legal_actions();
                    if actions.is_empty() {
                        return Err(SimError::NoLegalActions { episode, moves });
                    }
                    actions[rng.gen_range(0..actions.len())]
                }
                PlayerId::Terminal => break,
            };
            state.apply_action(action)?;
            moves += 1;
            if self.config.resample_every > 0 && moves % self.config.resample_every == 0 {
                verify_resample(&state, rng)?;
            }
        }
        check_conservation(&state)?;
        let returns = state.returns();
        for (seat, &value) in returns.iter().enumerate() {
            if value < self.game.min_utility() || value > self.game.max_utility() {
                return Err(SimError::ReturnsOutOfBounds { seat, value });
            }
        }
        Ok(EpisodeRecord {
            episode,
            moves,
            returns,
        })
    }
}

fn sample_chance<R: Rng + ?Sized>(state: &WizardState<'_>, rng: &mut R) -> Action {
    let outcomes = state.chance_outcomes();
    let mut choice = rng.gen_range(0.0..1.0);
    for &(action, probability) in &outcomes {
        if choice <= probability {
            return action;
        }
        choice -= probability;
    }
    outcomes.last().expect("chance node has outcomes").0
}

fn check_conservation(state: &WizardState<'_>) -> Result<(), SimError> {
    let round = state.round();
    let num_players = round.num_players();
    let held: usize = (0..num_players).map(|seat| round.hand(seat).len()).sum();
    // the forced no-trump Jester of a whole-deck round is a sentinel and
    // does not come out of the sixty
    let trump_from_deck =
        round.trump().is_some() && num_players * round.round_nr() < DECK_SIZE;
    let accounted = held
        + round.history().len()
        + round.table().len()
        + round.deck().remaining()
        + usize::from(trump_from_deck);
    if accounted != DECK_SIZE {
        return Err(SimError::Conservation { accounted });
    }
    Ok(())
}

fn verify_resample<R: Rng + ?Sized>(state: &WizardState<'_>, rng: &mut R) -> Result<(), SimError> {
    if state.current_player().is_chance() {
        return Ok(());
    }
    let viewpoint = rng.gen_range(0..state.round().num_players());
    let resampled = state.resample_from_infostate(viewpoint, rng)?;
    if resampled.information_state_string(viewpoint) != state.information_state_string(viewpoint)
        || resampled.information_state_tensor(viewpoint)
            != state.information_state_tensor(viewpoint)
    {
        return Err(SimError::ResampleMismatch { viewpoint });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] SimConfigError),
    #[error(transparent)]
    Game(#[from] ConfigError),
    #[error("engine rejected an action it advertised: {0}")]
    Round(#[from] RoundError),
    #[error("episode {episode} offered no legal actions after {moves} moves")]
    NoLegalActions { episode: usize, moves: usize },
    #[error("{accounted} cards accounted for instead of 60")]
    Conservation { accounted: usize },
    #[error("resampled world disagrees with viewpoint {viewpoint}")]
    ResampleMismatch { viewpoint: usize },
    #[error("seat {seat} returned {value} outside the utility bounds")]
    ReturnsOutOfBounds { seat: usize, value: f64 },
}
