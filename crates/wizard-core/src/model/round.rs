use crate::model::card::{Card, DISTINCT_CARDS};
use crate::model::color::Color;
use crate::model::deck::{DealError, Deck, DECK_SIZE};
use crate::model::hand::Hand;
use crate::model::score::{round_rewards, RewardMode};
use crate::model::trick::{Play, Trick};
use core::fmt;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;

/// One Wizard round: chance deals every hand and the trump card, each seat
/// bids once, then the hands are played out trick by trick.
///
/// Engine action ids: guesses occupy `[0, guess_count)` and card plays
/// `card_index + guess_count`; chance deals use raw card indices.
#[derive(Debug, Clone)]
pub struct Round {
    num_players: usize,
    round_nr: usize,
    start_player: usize,
    reward_mode: RewardMode,
    phase: RoundPhase,
    hands: Vec<Hand>,
    deck: Deck,
    trump: Option<Card>,
    guessed: Vec<Option<u8>>,
    tricks_won: Vec<u8>,
    table: Trick,
    history: Vec<Play>,
    tricks_completed: usize,
    turn: usize,
    stop_turn: usize,
    guess_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealing(DealProgress),
    Guessing,
    Tricking,
    Final,
}

impl RoundPhase {
    pub const fn name(self) -> &'static str {
        match self {
            RoundPhase::Dealing(_) => "dealing",
            RoundPhase::Guessing => "guessing",
            RoundPhase::Tricking => "tricking",
            RoundPhase::Final => "final",
        }
    }
}

/// How far the chance actor has come through the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealProgress {
    pub deal_to: usize,
    pub cards_dealt: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealOutcome {
    Dealt,
    TrumpRevealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Recorded,
    GuessingComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TableFull,
}

impl Round {
    pub fn new(
        num_players: usize,
        round_nr: usize,
        start_player: usize,
        reward_mode: RewardMode,
    ) -> Self {
        debug_assert!((MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players));
        debug_assert!(round_nr >= 1 && round_nr <= DECK_SIZE / num_players);
        debug_assert!(start_player < num_players);
        Self {
            phase: RoundPhase::Dealing(DealProgress {
                deal_to: start_player,
                cards_dealt: 0,
            }),
            hands: vec![Hand::new(); num_players],
            deck: Deck::full(),
            trump: None,
            guessed: vec![None; num_players],
            tricks_won: vec![0; num_players],
            table: Trick::new(),
            history: Vec::new(),
            tricks_completed: 0,
            turn: start_player,
            stop_turn: previous_seat(start_player, num_players),
            guess_count: DECK_SIZE / num_players + 1,
            num_players,
            round_nr,
            start_player,
            reward_mode,
        }
    }

    /// Deal one chance outcome: a hand card while hands are short, then the
    /// trump card. In the round that uses the whole deck there is nothing
    /// left to reveal and the only accepted outcome is the Jester standing
    /// for "no trump".
    pub fn deal_card(&mut self, index: usize) -> Result<DealOutcome, RoundError> {
        let progress = match self.phase {
            RoundPhase::Dealing(progress) => progress,
            phase => {
                return Err(RoundError::PhaseMismatch {
                    phase: phase.name(),
                    action: "deal",
                })
            }
        };
        if progress.cards_dealt < self.num_players * self.round_nr {
            let card = self.deck.deal(index)?;
            self.hands[progress.deal_to].add(card);
            self.phase = RoundPhase::Dealing(DealProgress {
                deal_to: next_seat(progress.deal_to, self.num_players),
                cards_dealt: progress.cards_dealt + 1,
            });
            Ok(DealOutcome::Dealt)
        } else {
            let trump = if self.deck.is_empty() {
                let card = Card::from_index(index).ok_or(DealError::UnknownCard(index))?;
                if !card.is_jester() {
                    return Err(RoundError::Deal(DealError::Exhausted(card)));
                }
                card
            } else {
                self.deck.deal(index)?
            };
            self.trump = Some(trump);
            self.phase = RoundPhase::Guessing;
            self.turn = self.start_player;
            self.stop_turn = previous_seat(self.start_player, self.num_players);
            Ok(DealOutcome::TrumpRevealed)
        }
    }

    pub fn guess_tricks(&mut self, guess: usize) -> Result<GuessOutcome, RoundError> {
        if !matches!(self.phase, RoundPhase::Guessing) {
            return Err(RoundError::PhaseMismatch {
                phase: self.phase.name(),
                action: "guess",
            });
        }
        if !self.legal_guesses(self.turn).contains(&guess) {
            return Err(RoundError::IllegalGuess {
                seat: self.turn,
                guess,
            });
        }
        self.guessed[self.turn] = Some(guess as u8);
        if self.turn == self.stop_turn {
            self.phase = RoundPhase::Tricking;
            self.turn = self.start_player;
            Ok(GuessOutcome::GuessingComplete)
        } else {
            self.turn = next_seat(self.turn, self.num_players);
            Ok(GuessOutcome::Recorded)
        }
    }

    pub fn play_card(&mut self, action: usize) -> Result<PlayOutcome, RoundError> {
        if !matches!(self.phase, RoundPhase::Tricking) {
            return Err(RoundError::PhaseMismatch {
                phase: self.phase.name(),
                action: "play",
            });
        }
        let card = action
            .checked_sub(self.guess_count)
            .and_then(Card::from_index)
            .ok_or(RoundError::UnknownAction { action })?;
        if !self.hands[self.turn].contains(card) {
            return Err(RoundError::CardNotHeld {
                seat: self.turn,
                card,
            });
        }
        if !self.legal_card_plays(self.turn).contains(&action) {
            let color = self
                .table
                .follow_color()
                .expect("an illegal play of a held card implies a follow color");
            return Err(RoundError::MustFollow {
                seat: self.turn,
                card,
                color,
            });
        }
        Ok(self.commit_play(card))
    }

    /// Possession-only variant of [`Round::play_card`] for re-driving a
    /// recorded play against a sampled world: a drawn hand may hold
    /// follow-color cards the real seat had already shown itself void of.
    pub(crate) fn replay_card(&mut self, action: usize) -> Result<PlayOutcome, RoundError> {
        if !matches!(self.phase, RoundPhase::Tricking) {
            return Err(RoundError::PhaseMismatch {
                phase: self.phase.name(),
                action: "play",
            });
        }
        let card = action
            .checked_sub(self.guess_count)
            .and_then(Card::from_index)
            .ok_or(RoundError::UnknownAction { action })?;
        if !self.hands[self.turn].contains(card) {
            return Err(RoundError::CardNotHeld {
                seat: self.turn,
                card,
            });
        }
        Ok(self.commit_play(card))
    }

    fn commit_play(&mut self, card: Card) -> PlayOutcome {
        self.hands[self.turn].remove(card);
        self.table.push(self.turn, card);
        if self.turn == self.stop_turn {
            PlayOutcome::TableFull
        } else {
            self.turn = next_seat(self.turn, self.num_players);
            PlayOutcome::Played
        }
    }

    /// Settle a full table: credit the winner, rotate the lead to it, and
    /// archive the plays. The round ends after the last trick.
    pub fn resolve_trick(&mut self) -> Result<usize, RoundError> {
        if !matches!(self.phase, RoundPhase::Tricking) {
            return Err(RoundError::PhaseMismatch {
                phase: self.phase.name(),
                action: "resolve",
            });
        }
        if self.table.len() != self.num_players {
            return Err(RoundError::TableNotFull {
                on_table: self.table.len(),
            });
        }
        let winner = self
            .table
            .winner(self.trump_color())
            .expect("full table has a winner");
        self.tricks_won[winner] += 1;
        self.history.extend(self.table.take_plays());
        self.tricks_completed += 1;
        self.turn = winner;
        self.stop_turn = previous_seat(winner, self.num_players);
        if self.tricks_completed == self.round_nr {
            self.phase = RoundPhase::Final;
        }
        Ok(winner)
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<usize> {
        let mut actions = self.legal_guesses(seat);
        actions.extend(self.legal_card_plays(seat));
        actions
    }

    /// Bids open to `seat`: every value in `[0, round_nr]`, except that the
    /// closing seat may not land the total on the number of tricks
    /// available.
    pub fn legal_guesses(&self, seat: usize) -> Vec<usize> {
        if !matches!(self.phase, RoundPhase::Guessing) || self.turn != seat {
            return Vec::new();
        }
        let sum: usize = self.guessed.iter().flatten().map(|&g| g as usize).sum();
        (0..=self.round_nr)
            .filter(|bid| !(seat == self.stop_turn && sum + bid == self.round_nr))
            .collect()
    }

    /// Card actions open to `seat`, ascending and deduplicated. Holding the
    /// follow color restricts the hand to that color plus White; otherwise
    /// everything held is playable.
    pub fn legal_card_plays(&self, seat: usize) -> Vec<usize> {
        if !matches!(self.phase, RoundPhase::Tricking) || self.turn != seat {
            return Vec::new();
        }
        let hand = &self.hands[seat];
        let follow = self.table.follow_color().filter(|&color| {
            hand.distinct_cards().any(|card| card.color() == color)
        });
        hand.distinct_cards()
            .filter(|card| match follow {
                Some(color) => card.color() == color || card.color().is_white(),
                None => true,
            })
            .map(|card| card.to_index() + self.guess_count)
            .collect()
    }

    pub fn rewards(&self) -> Vec<f64> {
        if !matches!(self.phase, RoundPhase::Final) {
            return vec![0.0; self.num_players];
        }
        let guessed: Vec<u8> = self.guessed.iter().map(|g| g.unwrap_or(0)).collect();
        round_rewards(&guessed, &self.tricks_won, self.reward_mode)
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn round_nr(&self) -> usize {
        self.round_nr
    }

    pub fn start_player(&self) -> usize {
        self.start_player
    }

    pub fn reward_mode(&self) -> RewardMode {
        self.reward_mode
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_final(&self) -> bool {
        matches!(self.phase, RoundPhase::Final)
    }

    pub fn hand(&self, seat: usize) -> &Hand {
        &self.hands[seat]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The trump card, once revealed; `None` while dealing.
    pub fn trump(&self) -> Option<Card> {
        self.trump
    }

    /// The trump suit. A White trump card (Wizard or the forced Jester)
    /// means no trump, as does an undealt one.
    pub fn trump_color(&self) -> Color {
        self.trump.map(Card::color).unwrap_or(Color::White)
    }

    pub fn guessed(&self) -> &[Option<u8>] {
        &self.guessed
    }

    pub fn tricks_won(&self) -> &[u8] {
        &self.tricks_won
    }

    pub fn table(&self) -> &Trick {
        &self.table
    }

    /// Plays of completed tricks, in play order.
    pub fn history(&self) -> &[Play] {
        &self.history
    }

    pub fn tricks_completed(&self) -> usize {
        self.tricks_completed
    }

    /// Seat on turn; meaningful from the Guessing phase on.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Seat whose action closes the current sub-phase.
    pub fn stop_turn(&self) -> usize {
        self.stop_turn
    }

    /// Hand cards dealt so far; the trump deal is accounted separately.
    pub fn cards_dealt(&self) -> usize {
        match self.phase {
            RoundPhase::Dealing(progress) => progress.cards_dealt,
            _ => self.num_players * self.round_nr,
        }
    }

    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    pub fn num_actions(&self) -> usize {
        DISTINCT_CARDS + self.guess_count
    }
}

const fn previous_seat(seat: usize, num_players: usize) -> usize {
    if seat == 0 {
        num_players - 1
    } else {
        seat - 1
    }
}

const fn next_seat(seat: usize, num_players: usize) -> usize {
    if seat + 1 >= num_players {
        0
    } else {
        seat + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    Deal(DealError),
    PhaseMismatch {
        phase: &'static str,
        action: &'static str,
    },
    IllegalGuess {
        seat: usize,
        guess: usize,
    },
    CardNotHeld {
        seat: usize,
        card: Card,
    },
    MustFollow {
        seat: usize,
        card: Card,
        color: Color,
    },
    UnknownAction {
        action: usize,
    },
    TableNotFull {
        on_table: usize,
    },
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::Deal(err) => err.fmt(f),
            RoundError::PhaseMismatch { phase, action } => {
                write!(f, "cannot {action} during the {phase} phase")
            }
            RoundError::IllegalGuess { seat, guess } => {
                write!(f, "guess {guess} is not legal for seat {seat}")
            }
            RoundError::CardNotHeld { seat, card } => {
                write!(f, "seat {seat} does not hold {card}")
            }
            RoundError::MustFollow { seat, card, color } => {
                write!(f, "seat {seat} cannot play {card} while holding color {color}")
            }
            RoundError::UnknownAction { action } => {
                write!(f, "action {action} does not name a card")
            }
            RoundError::TableNotFull { on_table } => {
                write!(f, "cannot resolve a trick with {on_table} cards on the table")
            }
        }
    }
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::Deal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DealError> for RoundError {
    fn from(err: DealError) -> Self {
        RoundError::Deal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DealOutcome, GuessOutcome, PlayOutcome, Round, RoundError, RoundPhase,
    };
    use crate::model::card::Card;
    use crate::model::color::Color;
    use crate::model::deck::DECK_SIZE;
    use crate::model::score::RewardMode;

    fn suited(color: Color, value: u8) -> Card {
        Card::suited(color, value).unwrap()
    }

    /// Deal the listed cards in seat order, then the trump card, leaving the
    /// round in Guessing.
    fn deal_script(round: &mut Round, deals: &[Card], trump: Card) {
        for card in deals {
            assert_eq!(round.deal_card(card.to_index()), Ok(DealOutcome::Dealt));
        }
        assert_eq!(
            round.deal_card(trump.to_index()),
            Ok(DealOutcome::TrumpRevealed)
        );
    }

    fn play(round: &mut Round, card: Card) -> Result<PlayOutcome, RoundError> {
        round.play_card(card.to_index() + round.guess_count())
    }

    #[test]
    fn dealing_cycles_seats_from_start_player() {
        let mut round = Round::new(3, 2, 1, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
                suited(Color::Blue, 4),
                suited(Color::Blue, 5),
                suited(Color::Blue, 6),
            ],
            suited(Color::Red, 9),
        );
        // start player 1 received the first and fourth card
        assert!(round.hand(1).contains(suited(Color::Blue, 1)));
        assert!(round.hand(1).contains(suited(Color::Blue, 4)));
        assert!(round.hand(0).contains(suited(Color::Blue, 3)));
        assert_eq!(round.phase(), RoundPhase::Guessing);
        assert_eq!(round.trump(), Some(suited(Color::Red, 9)));
        assert_eq!(round.trump_color(), Color::Red);
        assert_eq!(round.turn(), 1);
        assert_eq!(round.stop_turn(), 0);
    }

    #[test]
    fn trump_is_unset_while_dealing() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        assert_eq!(round.trump(), None);
        assert_eq!(round.trump_color(), Color::White);
        round.deal_card(suited(Color::Blue, 1).to_index()).unwrap();
        assert_eq!(round.trump(), None);
    }

    #[test]
    fn wizard_trump_card_means_no_trump() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            Card::WIZARD,
        );
        assert_eq!(round.trump_color(), Color::White);
    }

    #[test]
    fn forced_jester_when_whole_deck_is_dealt() {
        let mut round = Round::new(3, DECK_SIZE / 3, 0, RewardMode::Normal);
        for index in 0..crate::model::card::DISTINCT_CARDS {
            while round.deck().count(index) > 0 {
                round.deal_card(index).unwrap();
            }
        }
        assert_eq!(round.cards_dealt(), DECK_SIZE);
        assert!(round.deck().is_empty());
        // the only accepted trump outcome is the no-trump Jester
        assert!(round.deal_card(Card::WIZARD.to_index()).is_err());
        assert_eq!(
            round.deal_card(Card::JESTER.to_index()),
            Ok(DealOutcome::TrumpRevealed)
        );
        assert_eq!(round.trump_color(), Color::White);
        for color in Color::SUITS {
            assert!(!suited(color, 5).is_trump(round.trump_color()));
        }
    }

    #[test]
    fn guessing_rotates_and_closes_at_stop_turn() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            suited(Color::Red, 9),
        );
        assert_eq!(round.guess_tricks(1), Ok(GuessOutcome::Recorded));
        assert_eq!(round.turn(), 1);
        assert_eq!(round.guess_tricks(0), Ok(GuessOutcome::Recorded));
        assert_eq!(round.guess_tricks(1), Ok(GuessOutcome::GuessingComplete));
        assert_eq!(round.phase(), RoundPhase::Tricking);
        assert_eq!(round.turn(), 0);
        assert_eq!(round.guessed(), &[Some(1), Some(0), Some(1)]);
    }

    #[test]
    fn hook_rule_blocks_the_closing_seat() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            suited(Color::Red, 9),
        );
        round.guess_tricks(1).unwrap();
        round.guess_tricks(0).unwrap();
        // seat 2 closes; the total may not equal 1
        assert_eq!(round.legal_guesses(2), vec![1]);
        assert_eq!(
            round.guess_tricks(0),
            Err(RoundError::IllegalGuess { seat: 2, guess: 0 })
        );
        // non-closing seats were unrestricted
        let mut fresh = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut fresh,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            suited(Color::Red, 9),
        );
        assert_eq!(fresh.legal_guesses(0), vec![0, 1]);
    }

    #[test]
    fn guess_outside_range_is_rejected() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            suited(Color::Red, 9),
        );
        assert_eq!(
            round.guess_tricks(2),
            Err(RoundError::IllegalGuess { seat: 0, guess: 2 })
        );
    }

    #[test]
    fn follow_color_restricts_to_color_and_white() {
        let mut round = Round::new(3, 2, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Red, 5),
                suited(Color::Red, 7),
                suited(Color::Blue, 2),
                Card::WIZARD,
                suited(Color::Green, 4),
                suited(Color::Green, 11),
            ],
            suited(Color::Yellow, 1),
        );
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        round.guess_tricks(1).unwrap();
        play(&mut round, suited(Color::Red, 5)).unwrap();
        // seat 1 holds [R7] and [G4]: must follow Red or play White
        let legal = round.legal_card_plays(1);
        assert_eq!(legal, vec![suited(Color::Red, 7).to_index() + round.guess_count()]);
        assert_eq!(
            play(&mut round, suited(Color::Green, 4)),
            Err(RoundError::MustFollow {
                seat: 1,
                card: suited(Color::Green, 4),
                color: Color::Red,
            })
        );
        play(&mut round, suited(Color::Red, 7)).unwrap();
        // seat 2 holds no Red: everything is playable
        let legal = round.legal_card_plays(2);
        assert_eq!(legal.len(), 2);
    }

    #[test]
    fn wizard_is_always_playable_when_following() {
        let mut round = Round::new(3, 2, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Red, 5),
                suited(Color::Red, 7),
                suited(Color::Blue, 2),
                suited(Color::Blue, 9),
                Card::WIZARD,
                suited(Color::Green, 11),
            ],
            suited(Color::Yellow, 1),
        );
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        round.guess_tricks(1).unwrap();
        play(&mut round, suited(Color::Red, 5)).unwrap();
        // seat 1 holds [R7] and [W14]: both stay legal
        let legal = round.legal_card_plays(1);
        assert_eq!(
            legal,
            vec![
                Card::WIZARD.to_index() + round.guess_count(),
                suited(Color::Red, 7).to_index() + round.guess_count(),
            ]
        );
    }

    #[test]
    fn playing_a_card_not_held_fails() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
            ],
            suited(Color::Red, 9),
        );
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        assert_eq!(
            play(&mut round, suited(Color::Green, 4)),
            Err(RoundError::CardNotHeld {
                seat: 0,
                card: suited(Color::Green, 4),
            })
        );
    }

    #[test]
    fn trick_resolution_rotates_lead_to_winner() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 4),
                suited(Color::Blue, 11),
                suited(Color::Green, 13),
            ],
            suited(Color::Red, 9),
        );
        round.guess_tricks(0).unwrap();
        round.guess_tricks(1).unwrap();
        round.guess_tricks(1).unwrap();
        play(&mut round, suited(Color::Blue, 4)).unwrap();
        play(&mut round, suited(Color::Blue, 11)).unwrap();
        assert_eq!(
            play(&mut round, suited(Color::Green, 13)),
            Ok(PlayOutcome::TableFull)
        );
        assert_eq!(round.resolve_trick(), Ok(1));
        assert_eq!(round.tricks_won(), &[0, 1, 0]);
        assert_eq!(round.turn(), 1);
        assert_eq!(round.stop_turn(), 0);
        assert_eq!(round.tricks_completed(), 1);
        assert_eq!(round.history().len(), 3);
        assert!(round.table().is_empty());
        assert_eq!(round.phase(), RoundPhase::Final);
    }

    #[test]
    fn rewards_are_zero_before_final() {
        let round = Round::new(4, 1, 0, RewardMode::Normal);
        assert_eq!(round.rewards(), vec![0.0; 4]);
    }

    #[test]
    fn final_rewards_follow_the_reward_mode() {
        for (mode, expected) in [
            (RewardMode::Normal, vec![20.0, 30.0, -10.0]),
            (RewardMode::Binary, vec![1.0, 1.0, -1.0]),
        ] {
            let mut round = Round::new(3, 1, 0, mode);
            deal_script(
                &mut round,
                &[
                    suited(Color::Blue, 4),
                    suited(Color::Blue, 11),
                    suited(Color::Green, 13),
                ],
                suited(Color::Red, 9),
            );
            round.guess_tricks(0).unwrap();
            round.guess_tricks(1).unwrap();
            round.guess_tricks(1).unwrap();
            play(&mut round, suited(Color::Blue, 4)).unwrap();
            play(&mut round, suited(Color::Blue, 11)).unwrap();
            play(&mut round, suited(Color::Green, 13)).unwrap();
            round.resolve_trick().unwrap();
            assert_eq!(round.rewards(), expected);
        }
    }

    #[test]
    fn card_conservation_holds_throughout() {
        let mut round = Round::new(4, 2, 0, RewardMode::Normal);
        let accounted = |round: &Round| {
            let held: usize = (0..4).map(|seat| round.hand(seat).len()).sum();
            held + round.history().len()
                + round.table().len()
                + round.deck().remaining()
                + usize::from(round.trump().is_some())
        };
        assert_eq!(accounted(&round), DECK_SIZE);
        deal_script(
            &mut round,
            &[
                suited(Color::Blue, 1),
                suited(Color::Blue, 2),
                suited(Color::Blue, 3),
                suited(Color::Blue, 4),
                suited(Color::Red, 1),
                suited(Color::Red, 2),
                suited(Color::Red, 3),
                suited(Color::Red, 4),
            ],
            suited(Color::Green, 9),
        );
        assert_eq!(accounted(&round), DECK_SIZE);
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        round.guess_tricks(0).unwrap();
        round.guess_tricks(1).unwrap();
        play(&mut round, suited(Color::Blue, 1)).unwrap();
        assert_eq!(accounted(&round), DECK_SIZE);
        play(&mut round, suited(Color::Blue, 2)).unwrap();
        play(&mut round, suited(Color::Blue, 3)).unwrap();
        play(&mut round, suited(Color::Blue, 4)).unwrap();
        round.resolve_trick().unwrap();
        assert_eq!(accounted(&round), DECK_SIZE);
    }

    #[test]
    fn actions_rejected_in_wrong_phase() {
        let mut round = Round::new(3, 1, 0, RewardMode::Normal);
        assert!(matches!(
            round.guess_tricks(0),
            Err(RoundError::PhaseMismatch { .. })
        ));
        assert!(matches!(
            round.play_card(round.guess_count()),
            Err(RoundError::PhaseMismatch { .. })
        ));
        assert!(matches!(
            round.resolve_trick(),
            Err(RoundError::PhaseMismatch { .. })
        ));
    }
}
