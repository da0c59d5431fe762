use crate::framework::{Action, PlayerId, State};
use crate::model::card::{Card, DISTINCT_CARDS};
use crate::model::round::{PlayOutcome, Round, RoundError, RoundPhase};
use core::fmt;
use rand::Rng;

use super::resample;
use super::WizardGame;

/// Framework view of one round. Owns the [`Round`] plus the action history
/// annotated with its actors; borrows the game for configuration and the
/// shared observers.
#[derive(Debug, Clone)]
pub struct WizardState<'g> {
    game: &'g WizardGame,
    round: Round,
    history: Vec<(PlayerId, Action)>,
}

impl<'g> WizardState<'g> {
    pub(crate) fn new(game: &'g WizardGame) -> Self {
        let config = game.config();
        Self {
            game,
            round: Round::new(
                config.players,
                config.round,
                config.start_player,
                config.reward_mode,
            ),
            history: Vec::new(),
        }
    }

    pub fn game(&self) -> &'g WizardGame {
        self.game
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Actions applied so far, chance included.
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Re-drive a recorded action against a sampled world. Card plays skip
    /// the follow-color check, which a resampled hand is not guaranteed to
    /// satisfy; everything else applies normally.
    pub(crate) fn apply_replay_action(&mut self, action: Action) -> Result<(), RoundError> {
        if !matches!(self.round.phase(), RoundPhase::Tricking) {
            return self.apply_action(action);
        }
        let actor = self.current_player();
        if self.round.replay_card(action)? == PlayOutcome::TableFull {
            self.round.resolve_trick()?;
        }
        self.history.push((actor, action));
        Ok(())
    }
}

impl fmt::Display for WizardState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (player, action)) in self.history.iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "({player}, {action})")?;
        }
        Ok(())
    }
}

impl State for WizardState<'_> {
    type Error = RoundError;

    fn current_player(&self) -> PlayerId {
        match self.round.phase() {
            RoundPhase::Dealing(_) => PlayerId::Chance,
            RoundPhase::Guessing | RoundPhase::Tricking => PlayerId::Player(self.round.turn()),
            RoundPhase::Final => PlayerId::Terminal,
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.round.phase() {
            RoundPhase::Final => Vec::new(),
            RoundPhase::Dealing(_) => {
                let counts = self.round.deck().card_counts();
                let mut actions: Vec<Action> =
                    (0..DISTINCT_CARDS).filter(|&index| counts[index] > 0).collect();
                if actions.is_empty() {
                    // whole deck in hands: the forced no-trump Jester
                    actions.push(Card::JESTER.to_index());
                }
                actions
            }
            _ => self.round.legal_actions(self.round.turn()),
        }
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        debug_assert!(self.current_player().is_chance());
        let deck = self.round.deck();
        if deck.is_empty() {
            return vec![(Card::JESTER.to_index(), 1.0)];
        }
        let total = deck.remaining() as f64;
        deck.card_counts()
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(index, &count)| (index, count as f64 / total))
            .collect()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), RoundError> {
        let actor = self.current_player();
        match self.round.phase() {
            RoundPhase::Final => {
                return Err(RoundError::PhaseMismatch {
                    phase: "final",
                    action: "apply",
                })
            }
            RoundPhase::Dealing(_) => {
                self.round.deal_card(action)?;
            }
            RoundPhase::Guessing => {
                self.round.guess_tricks(action)?;
            }
            RoundPhase::Tricking => {
                if self.round.play_card(action)? == PlayOutcome::TableFull {
                    self.round.resolve_trick()?;
                }
            }
        }
        self.history.push((actor, action));
        Ok(())
    }

    fn action_to_string(&self, _player: PlayerId, action: Action) -> String {
        let card = match self.round.phase() {
            RoundPhase::Dealing(_) => Card::from_index(action),
            RoundPhase::Guessing => return action.to_string(),
            _ => action
                .checked_sub(self.round.guess_count())
                .and_then(Card::from_index),
        };
        match card {
            Some(card) => card.to_string(),
            None => format!("invalid action {action}"),
        }
    }

    fn is_terminal(&self) -> bool {
        self.round.is_final()
    }

    fn returns(&self) -> Vec<f64> {
        self.round.rewards()
    }

    fn information_state_string(&self, player: usize) -> String {
        self.game.info_state_observer().string_from(self, player)
    }

    fn information_state_tensor(&self, player: usize) -> Vec<f32> {
        self.game.info_state_observer().tensor_from(self, player)
    }

    fn observation_string(&self, player: usize) -> String {
        self.game.default_observer().string_from(self, player)
    }

    fn observation_tensor(&self, player: usize) -> Vec<f32> {
        self.game.default_observer().tensor_from(self, player)
    }

    fn history(&self) -> &[(PlayerId, Action)] {
        &self.history
    }

    fn resample_from_infostate<R: Rng + ?Sized>(
        &self,
        player: usize,
        rng: &mut R,
    ) -> Result<Self, RoundError> {
        resample::resample_from_infostate(self, player, rng)
    }
}
