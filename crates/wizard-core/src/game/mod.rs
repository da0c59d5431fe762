pub mod config;
pub mod observer;
mod resample;
pub mod serialization;
pub mod state;

use crate::framework::{
    ChanceMode, Dynamics, Game, GameType, Information, ObservationType, RewardModel, Utility,
};
use crate::model::card::DISTINCT_CARDS;
use crate::model::round::{MAX_PLAYERS, MIN_PLAYERS};
use crate::model::score::{max_utility, min_utility};
use config::{ConfigError, WizardConfig};
use observer::WizardObserver;
use state::WizardState;

/// Descriptor advertised to the framework registry.
pub const GAME_TYPE: GameType = GameType {
    short_name: "wizard",
    long_name: "Wizard",
    dynamics: Dynamics::Sequential,
    chance_mode: ChanceMode::ExplicitStochastic,
    information: Information::ImperfectInformation,
    utility: Utility::GeneralSum,
    reward_model: RewardModel::Terminal,
    min_num_players: MIN_PLAYERS,
    max_num_players: MAX_PLAYERS,
    provides_information_state_string: true,
    provides_information_state_tensor: true,
    provides_observation_string: true,
    provides_observation_tensor: true,
};

/// One parameterization of the game. States borrow the game they came from,
/// reaching back for its observers and configuration; the observers are
/// built once here and never change.
#[derive(Debug, Clone)]
pub struct WizardGame {
    config: WizardConfig,
    guess_count: usize,
    info_state_observer: WizardObserver,
    default_observer: WizardObserver,
}

impl WizardGame {
    pub fn new(config: WizardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            guess_count: config.max_round() + 1,
            info_state_observer: WizardObserver::new(ObservationType::INFORMATION_STATE),
            default_observer: WizardObserver::new(ObservationType::OBSERVATION),
            config,
        })
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Number of guess actions: bids range over `[0, 60 / players]`.
    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    pub fn new_initial_state(&self) -> WizardState<'_> {
        WizardState::new(self)
    }

    pub(crate) fn info_state_observer(&self) -> &WizardObserver {
        &self.info_state_observer
    }

    pub(crate) fn default_observer(&self) -> &WizardObserver {
        &self.default_observer
    }
}

impl Game for WizardGame {
    type State<'a> = WizardState<'a>
    where
        Self: 'a;

    fn new_initial_state(&self) -> WizardState<'_> {
        WizardGame::new_initial_state(self)
    }

    fn game_type(&self) -> &GameType {
        &GAME_TYPE
    }

    fn num_players(&self) -> usize {
        self.config.players
    }

    fn num_distinct_actions(&self) -> usize {
        DISTINCT_CARDS + self.guess_count
    }

    fn max_chance_outcomes(&self) -> usize {
        DISTINCT_CARDS
    }

    fn max_game_length(&self) -> usize {
        self.config.players * self.config.round + self.config.players
    }

    fn min_utility(&self) -> f64 {
        min_utility(self.config.players, self.config.reward_mode)
    }

    fn max_utility(&self) -> f64 {
        max_utility(self.config.players, self.config.reward_mode)
    }

    fn information_state_tensor_shape(&self) -> Vec<usize> {
        vec![self
            .info_state_observer
            .tensor_len(self.config.players, self.config.round)]
    }

    fn observation_tensor_shape(&self) -> Vec<usize> {
        vec![self
            .default_observer
            .tensor_len(self.config.players, self.config.round)]
    }
}
