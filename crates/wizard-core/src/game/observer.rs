//! Seat-relative encodings of a state, as a symbolic string and as a dense
//! tensor. Two observers exist per game: the perfect-recall information
//! state and the Markov observation; both share the common blocks (seat,
//! private hand, round, trump, guesses) and differ in what they append.

use crate::framework::{ObservationType, PrivateInfoType, State};
use crate::model::card::DISTINCT_CARDS;
use crate::model::color::Color;
use crate::model::round::RoundPhase;
use core::fmt;

use super::state::WizardState;

#[derive(Debug, Clone, Copy)]
pub struct WizardObserver {
    obs_type: ObservationType,
}

impl WizardObserver {
    pub(crate) const fn new(obs_type: ObservationType) -> Self {
        Self { obs_type }
    }

    pub fn obs_type(&self) -> ObservationType {
        self.obs_type
    }

    /// Tensor length for an `(N, R)` game; fixed per configuration.
    pub fn tensor_len(&self, num_players: usize, round_nr: usize) -> usize {
        let mut len = num_players;
        if matches!(self.obs_type.private_info, PrivateInfoType::SinglePlayer) {
            len += DISTINCT_CARDS;
        }
        if self.obs_type.public_info {
            len += 1 + Color::SUITS.len() + num_players;
            if self.obs_type.perfect_recall {
                len += 1 + num_players * round_nr * DISTINCT_CARDS;
            } else {
                len += num_players + num_players * DISTINCT_CARDS;
            }
        }
        len
    }

    pub fn tensor_from(&self, state: &WizardState<'_>, player: usize) -> Vec<f32> {
        let round = state.round();
        let num_players = round.num_players();
        let round_nr = round.round_nr();
        let mut out = Vec::with_capacity(self.tensor_len(num_players, round_nr));

        for seat in 0..num_players {
            out.push(if seat == player { 1.0 } else { 0.0 });
        }

        if matches!(self.obs_type.private_info, PrivateInfoType::SinglePlayer) {
            // hand as a count vector over the 54 identities
            for &count in round.hand(player).counts() {
                out.push(count as f32);
            }
        }

        if self.obs_type.public_info {
            out.push(round_nr as f32);
            // trump one-hot over the four suits; all zero means no trump
            let trump = round.trump_color();
            for suit in Color::SUITS {
                out.push(if trump == suit { 1.0 } else { 0.0 });
            }
            for seat in 0..num_players {
                out.push(round.guessed()[seat].map(f32::from).unwrap_or(0.0));
            }

            if self.obs_type.perfect_recall {
                out.push(state.move_number() as f32);
                // one row per play, in play order across the whole round
                let mut rows = vec![0.0; num_players * round_nr * DISTINCT_CARDS];
                for (position, play) in round
                    .history()
                    .iter()
                    .chain(round.table().plays())
                    .enumerate()
                {
                    rows[position * DISTINCT_CARDS + play.card.to_index()] = 1.0;
                }
                out.extend(rows);
            } else {
                for seat in 0..num_players {
                    out.push(round.tricks_won()[seat] as f32);
                }
                // current table, one row per seat
                let mut rows = vec![0.0; num_players * DISTINCT_CARDS];
                for play in round.table().plays() {
                    rows[play.seat * DISTINCT_CARDS + play.card.to_index()] = 1.0;
                }
                out.extend(rows);
            }
        }

        debug_assert_eq!(out.len(), self.tensor_len(num_players, round_nr));
        out
    }

    pub fn string_from(&self, state: &WizardState<'_>, player: usize) -> String {
        let round = state.round();
        if matches!(round.phase(), RoundPhase::Dealing(_)) {
            return "dealing cards".to_string();
        }

        let guessed: Vec<usize> = round
            .guessed()
            .iter()
            .map(|guess| guess.map(usize::from).unwrap_or(0))
            .collect();
        let trump = round
            .trump()
            .map(|card| card.to_string())
            .expect("trump is dealt once guessing starts");

        let mut out = String::new();
        out.push_str(&format!("player\t{player}\n"));
        out.push_str(&format!("current_player\t{}\n", state.current_player()));
        out.push_str(&format!("round\t{}\n", round.round_nr()));
        out.push_str(&format!("num_players\t{}\n", round.num_players()));
        out.push_str(&format!("guessed\t{}\n", join(&guessed)));
        out.push_str(&format!("tricks\t{}\n", join(round.tricks_won())));
        out.push_str(&format!("phase\t{}\n", round.phase().name()));
        out.push_str(&format!(
            "table\t{}\n",
            join(round.table().plays().iter().map(|play| play.card))
        ));
        out.push_str(&format!(
            "played_by\t{}\n",
            join(round.table().plays().iter().map(|play| play.seat))
        ));
        out.push_str(&format!("hand\t{}\n", join(round.hand(player).cards())));
        out.push_str(&format!("trump\t{trump}\n"));
        out.push_str(&format!(
            "legal_actions\t{}\n",
            join(round.legal_actions(player))
        ));

        if self.obs_type.public_info && self.obs_type.perfect_recall {
            out.push_str(&format!(
                "history\t{}\n",
                join(round.history().iter().map(|play| play.card))
            ));
            out.push_str(&format!(
                "history_by\t{}\n",
                join(round.history().iter().map(|play| play.seat))
            ));
        }
        out
    }
}

fn join<T, I>(items: I) -> String
where
    T: fmt::Display,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
