use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    Blue = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    White = 4,
}

impl Color {
    /// The four suits that can carry trump. White is reserved for the
    /// special cards and never names a trump suit.
    pub const SUITS: [Color; 4] = [Color::Blue, Color::Red, Color::Green, Color::Yellow];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::Blue),
            1 => Some(Color::Red),
            2 => Some(Color::Green),
            3 => Some(Color::Yellow),
            4 => Some(Color::White),
            _ => None,
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'B' => Some(Color::Blue),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'W' => Some(Color::White),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Color::Blue => "B",
            Color::Red => "R",
            Color::Green => "G",
            Color::Yellow => "Y",
            Color::White => "W",
        };
        f.write_str(symbol)
    }
}
