use crate::model::color::Color;
use core::fmt;
use std::str::FromStr;

pub const MIN_CARD_VALUE: u8 = 1;
pub const MAX_CARD_VALUE: u8 = 13;
pub const JESTER_VALUE: u8 = 0;
pub const WIZARD_VALUE: u8 = 14;

/// Distinct card identities: Jester, Wizard, then the 52 suited cards.
pub const DISTINCT_CARDS: usize = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    color: Color,
    value: u8,
}

impl Card {
    pub const JESTER: Card = Card {
        color: Color::White,
        value: JESTER_VALUE,
    };

    pub const WIZARD: Card = Card {
        color: Color::White,
        value: WIZARD_VALUE,
    };

    /// A suited card with value in `[1, 13]`.
    pub fn suited(color: Color, value: u8) -> Option<Self> {
        if color.is_white() || !(MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&value) {
            return None;
        }
        Some(Self { color, value })
    }

    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn value(self) -> u8 {
        self.value
    }

    pub const fn is_wizard(self) -> bool {
        matches!(self.color, Color::White) && self.value == WIZARD_VALUE
    }

    pub const fn is_jester(self) -> bool {
        matches!(self.color, Color::White) && self.value == JESTER_VALUE
    }

    pub const fn is_special(self) -> bool {
        matches!(self.color, Color::White)
    }

    /// Whether this card belongs to the trump suit. White never is trump.
    pub fn is_trump(self, trump: Color) -> bool {
        !trump.is_white() && self.color == trump
    }

    /// Convert card to unique index in range 0..54
    /// Encoding: 0 = Jester, 1 = Wizard, then `2 + color * 13 + (value - 1)`
    pub fn to_index(self) -> usize {
        if self.is_jester() {
            0
        } else if self.is_wizard() {
            1
        } else {
            2 + self.color.index() * MAX_CARD_VALUE as usize + (self.value as usize - 1)
        }
    }

    /// Convert index (0..54) back to Card
    /// Returns None if index >= 54
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Card::JESTER),
            1 => Some(Card::WIZARD),
            2..=53 => {
                let rest = index - 2;
                let color = Color::from_index(rest / MAX_CARD_VALUE as usize)?;
                Card::suited(color, (rest % MAX_CARD_VALUE as usize) as u8 + 1)
            }
            _ => None,
        }
    }

    /// Strict winner test between the current best card of a trick and a
    /// challenger played after it, under the given trump suit:
    /// Wizards win outright, Jesters lose to anything but each other, trump
    /// beats off-trump, an off-color challenger cannot beat the incumbent,
    /// and ties on color go to the higher value with the incumbent keeping
    /// equal values.
    pub fn wins_against(self, challenger: Card, trump: Color) -> bool {
        debug_assert!(
            self != challenger || self.is_special(),
            "duplicate suited card {self} on the table"
        );
        if self.is_wizard() {
            true
        } else if challenger.is_wizard() {
            false
        } else if self.is_jester() && !challenger.is_jester() {
            false
        } else if self.is_trump(trump) && !challenger.is_trump(trump) {
            true
        } else if !self.is_trump(trump) && challenger.is_trump(trump) {
            false
        } else if self.color != challenger.color {
            true
        } else {
            self.value >= challenger.value
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}]", self.color, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    Malformed(String),
    UnknownColor(char),
    InvalidValue { color: Color, value: u8 },
}

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardParseError::Malformed(label) => write!(f, "malformed card label {label:?}"),
            CardParseError::UnknownColor(letter) => write!(f, "unknown card color {letter:?}"),
            CardParseError::InvalidValue { color, value } => {
                write!(f, "value {value} is not valid for color {color}")
            }
        }
    }
}

impl std::error::Error for CardParseError {}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CardParseError::Malformed(s.to_string());
        let inner = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(malformed)?;
        let mut chars = inner.chars();
        let letter = chars.next().ok_or_else(malformed)?;
        let color = Color::from_letter(letter).ok_or(CardParseError::UnknownColor(letter))?;
        let value: u8 = chars.as_str().parse().map_err(|_| malformed())?;
        if color.is_white() {
            match value {
                JESTER_VALUE => Ok(Card::JESTER),
                WIZARD_VALUE => Ok(Card::WIZARD),
                _ => Err(CardParseError::InvalidValue { color, value }),
            }
        } else {
            Card::suited(color, value).ok_or(CardParseError::InvalidValue { color, value })
        }
    }
}
