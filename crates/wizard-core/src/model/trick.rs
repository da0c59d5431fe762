use crate::model::card::Card;
use crate::model::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: usize,
    pub card: Card,
}

/// The ordered plays of the trick currently on the table.
#[derive(Debug, Clone, Default)]
pub struct Trick {
    plays: Vec<Play>,
}

impl Trick {
    pub fn new() -> Self {
        Self { plays: Vec::new() }
    }

    pub fn push(&mut self, seat: usize, card: Card) {
        self.plays.push(Play { seat, card });
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Color subsequent players must follow, if any. The first card that is
    /// not a Jester decides; a Wizard there (like an empty or all-Jester
    /// table) leaves the trick unconstrained.
    pub fn follow_color(&self) -> Option<Color> {
        let first = self.plays.iter().find(|play| !play.card.is_jester())?;
        if first.card.is_wizard() {
            None
        } else {
            Some(first.card.color())
        }
    }

    /// Seat holding the trick under `trump`, comparing plays left to right.
    pub fn winner(&self, trump: Color) -> Option<usize> {
        let mut best = self.plays.first()?;
        for play in &self.plays[1..] {
            if !best.card.wins_against(play.card, trump) {
                best = play;
            }
        }
        Some(best.seat)
    }

    pub fn take_plays(&mut self) -> Vec<Play> {
        std::mem::take(&mut self.plays)
    }
}
