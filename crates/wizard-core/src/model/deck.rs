use crate::model::card::{Card, DISTINCT_CARDS};
use core::fmt;

/// Copies of the Jester and the Wizard in a full deck.
pub const SPECIAL_COPIES: u8 = 4;

/// Total cards in a full deck: 52 suited plus four of each special.
pub const DECK_SIZE: usize = 60;

/// Multiset of undealt cards, keyed by card index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    counts: [u8; DISTINCT_CARDS],
    remaining: u8,
}

impl Deck {
    pub fn full() -> Self {
        let mut counts = [1u8; DISTINCT_CARDS];
        counts[Card::JESTER.to_index()] = SPECIAL_COPIES;
        counts[Card::WIZARD.to_index()] = SPECIAL_COPIES;
        Self {
            counts,
            remaining: DECK_SIZE as u8,
        }
    }

    /// Remove one copy of the card at `index`. Fails once every copy of
    /// that identity has been dealt.
    pub fn deal(&mut self, index: usize) -> Result<Card, DealError> {
        let card = Card::from_index(index).ok_or(DealError::UnknownCard(index))?;
        if self.counts[index] == 0 {
            return Err(DealError::Exhausted(card));
        }
        self.counts[index] -= 1;
        self.remaining -= 1;
        Ok(card)
    }

    pub fn count(&self, index: usize) -> u8 {
        self.counts[index]
    }

    pub fn card_counts(&self) -> &[u8; DISTINCT_CARDS] {
        &self.counts
    }

    pub fn remaining(&self) -> usize {
        self.remaining as usize
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    UnknownCard(usize),
    Exhausted(Card),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::UnknownCard(index) => write!(f, "no card has index {index}"),
            DealError::Exhausted(card) => {
                write!(f, "every copy of {card} has already been dealt")
            }
        }
    }
}

impl std::error::Error for DealError {}
