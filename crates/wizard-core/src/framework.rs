//! The sequential-game contract consumed by the engine. The host framework
//! that drives these traits (search, CFR, policy evaluation) lives outside
//! this crate; the definitions here are the seam it plugs into.

use core::fmt;
use rand::Rng;

/// Actions are non-negative integers partitioned by phase.
pub type Action = usize;

pub const CHANCE_PLAYER_ID: i32 = -1;
pub const TERMINAL_PLAYER_ID: i32 = -4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    Player(usize),
    Chance,
    Terminal,
}

impl PlayerId {
    /// The framework's integer id convention: seats count from zero, chance
    /// and terminal markers are negative.
    pub fn id(self) -> i32 {
        match self {
            PlayerId::Player(seat) => seat as i32,
            PlayerId::Chance => CHANCE_PLAYER_ID,
            PlayerId::Terminal => TERMINAL_PLAYER_ID,
        }
    }

    pub fn seat(self) -> Option<usize> {
        match self {
            PlayerId::Player(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn is_chance(self) -> bool {
        matches!(self, PlayerId::Chance)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateInfoType {
    None,
    SinglePlayer,
    AllPlayers,
}

/// Which parts of a state an observer reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationType {
    pub private_info: PrivateInfoType,
    pub public_info: bool,
    pub perfect_recall: bool,
}

impl ObservationType {
    /// Perfect-recall view: everything the seat has observed so far.
    pub const INFORMATION_STATE: ObservationType = ObservationType {
        private_info: PrivateInfoType::SinglePlayer,
        public_info: true,
        perfect_recall: true,
    };

    /// Markov view: the current public situation plus the seat's hand.
    pub const OBSERVATION: ObservationType = ObservationType {
        private_info: PrivateInfoType::SinglePlayer,
        public_info: true,
        perfect_recall: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dynamics {
    Sequential,
    Simultaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanceMode {
    Deterministic,
    ExplicitStochastic,
    SampledStochastic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Information {
    PerfectInformation,
    ImperfectInformation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    ZeroSum,
    ConstantSum,
    GeneralSum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardModel {
    Rewards,
    Terminal,
}

/// Static description of a game advertised to the framework registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameType {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub dynamics: Dynamics,
    pub chance_mode: ChanceMode,
    pub information: Information,
    pub utility: Utility,
    pub reward_model: RewardModel,
    pub min_num_players: usize,
    pub max_num_players: usize,
    pub provides_information_state_string: bool,
    pub provides_information_state_tensor: bool,
    pub provides_observation_string: bool,
    pub provides_observation_tensor: bool,
}

pub trait Game {
    type State<'a>: State
    where
        Self: 'a;

    fn new_initial_state(&self) -> Self::State<'_>;

    fn game_type(&self) -> &GameType;

    fn num_players(&self) -> usize;

    fn num_distinct_actions(&self) -> usize;

    fn max_chance_outcomes(&self) -> usize;

    /// Upper bound on player moves in one episode; chance moves excluded.
    fn max_game_length(&self) -> usize;

    fn min_utility(&self) -> f64;

    fn max_utility(&self) -> f64;

    fn information_state_tensor_shape(&self) -> Vec<usize>;

    fn observation_tensor_shape(&self) -> Vec<usize>;
}

pub trait State: Clone + fmt::Display {
    type Error: std::error::Error;

    fn current_player(&self) -> PlayerId;

    /// Sorted ascending; empty exactly when the state is terminal.
    fn legal_actions(&self) -> Vec<Action>;

    /// Outcomes and probabilities at a chance node.
    fn chance_outcomes(&self) -> Vec<(Action, f64)>;

    fn apply_action(&mut self, action: Action) -> Result<(), Self::Error>;

    fn action_to_string(&self, player: PlayerId, action: Action) -> String;

    fn is_terminal(&self) -> bool;

    /// Terminal rewards per seat; all zero while the episode is running.
    fn returns(&self) -> Vec<f64>;

    fn information_state_string(&self, player: usize) -> String;

    fn information_state_tensor(&self, player: usize) -> Vec<f32>;

    fn observation_string(&self, player: usize) -> String;

    fn observation_tensor(&self, player: usize) -> Vec<f32>;

    /// Every action applied so far, labeled with its actor.
    fn history(&self) -> &[(PlayerId, Action)];

    /// Draw a full state consistent with `player`'s information, using only
    /// the injected rng as a source of randomness.
    fn resample_from_infostate<R: Rng + ?Sized>(
        &self,
        player: usize,
        rng: &mut R,
    ) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::{ObservationType, PlayerId, PrivateInfoType};

    #[test]
    fn player_ids_follow_the_convention() {
        assert_eq!(PlayerId::Player(2).id(), 2);
        assert_eq!(PlayerId::Chance.id(), -1);
        assert_eq!(PlayerId::Terminal.id(), -4);
        assert_eq!(PlayerId::Player(3).seat(), Some(3));
        assert_eq!(PlayerId::Chance.seat(), None);
    }

    #[test]
    fn canonical_observation_types_differ_in_recall() {
        assert!(ObservationType::INFORMATION_STATE.perfect_recall);
        assert!(!ObservationType::OBSERVATION.perfect_recall);
        for obs in [
            ObservationType::INFORMATION_STATE,
            ObservationType::OBSERVATION,
        ] {
            assert_eq!(obs.private_info, PrivateInfoType::SinglePlayer);
            assert!(obs.public_info);
        }
    }
}
