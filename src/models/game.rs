//! Reported game results and generated pairings.

use serde::{Deserialize, Serialize};

/// One reported game. Immutable once recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub round: u32,
    pub winner: String,
    pub winner_score: i64,
    pub loser: String,
    pub loser_score: i64,
    /// Whether the winner moved first.
    pub winner_first: bool,
}

impl GameResult {
    /// Winner's score minus loser's score. Zero means the game was a tie.
    pub fn spread(&self) -> i64 {
        self.winner_score - self.loser_score
    }
}

/// Two players meeting in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: String,
    pub second: String,
    /// True if `first` moves first; `second` moves first otherwise.
    pub first_starts: bool,
    /// Meetings between these two, including this one once the round is recorded.
    pub repeats: u32,
}

impl Pairing {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            first_starts: true,
            repeats: 0,
        }
    }

    /// Same pair with the lower name first.
    pub fn canonical(first: &str, second: &str) -> Self {
        if first <= second {
            Self::new(first, second)
        } else {
            Self::new(second, first)
        }
    }

    pub fn second_starts(&self) -> bool {
        !self.first_starts
    }

    /// (player moving first, player moving second)
    pub fn in_start_order(&self) -> (&str, &str) {
        if self.first_starts {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}
