use crate::model::deck::DECK_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RewardMode {
    Normal = 0,
    Binary = 1,
}

impl RewardMode {
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(RewardMode::Normal),
            1 => Some(RewardMode::Binary),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Terminal scores per seat. An exact bid pays `20 + 10 * tricks`, a miss
/// costs `10` per trick of error; binary mode keeps only the sign.
pub fn round_rewards(guessed: &[u8], tricks: &[u8], mode: RewardMode) -> Vec<f64> {
    debug_assert_eq!(guessed.len(), tricks.len());
    guessed
        .iter()
        .zip(tricks)
        .map(|(&guess, &taken)| {
            let diff = (taken as i32 - guess as i32).abs();
            let score = if diff == 0 {
                20.0 + 10.0 * taken as f64
            } else {
                -10.0 * diff as f64
            };
            match mode {
                RewardMode::Normal => score,
                RewardMode::Binary => {
                    if score > 0.0 {
                        1.0
                    } else {
                        -1.0
                    }
                }
            }
        })
        .collect()
}

/// Lowest terminal score reachable across the largest round for `num_players`.
pub fn min_utility(num_players: usize, mode: RewardMode) -> f64 {
    match mode {
        RewardMode::Binary => -1.0,
        RewardMode::Normal => (1..=DECK_SIZE / num_players)
            .map(|tricks| -10.0 * tricks as f64)
            .sum(),
    }
}

/// Highest terminal score reachable across the largest round for `num_players`.
pub fn max_utility(num_players: usize, mode: RewardMode) -> f64 {
    match mode {
        RewardMode::Binary => 1.0,
        RewardMode::Normal => (1..=DECK_SIZE / num_players)
            .map(|tricks| 20.0 + 10.0 * tricks as f64)
            .sum(),
    }
}
