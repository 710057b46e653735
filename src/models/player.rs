//! Player aggregate: win/loss/tie counts, spread and first-move count.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Name used for the placeholder opponent in odd-sized fields.
pub const BYE: &str = "bye";

/// True if `name` is the bye placeholder (case-insensitive).
pub fn is_bye(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(BYE)
}

/// Running totals for one player, rebuilt by replaying results.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Points scored minus points conceded, over all games.
    pub spread: i64,
    /// Games in which this player moved first.
    pub starts: u32,
}

impl Player {
    /// Create a player with no games.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Wins plus half a point per tie.
    pub fn score(&self) -> f64 {
        f64::from(self.wins) + 0.5 * f64::from(self.ties)
    }

    /// Losses plus half a point per tie (the "against" column of the standings).
    pub fn losses_equivalent(&self) -> f64 {
        f64::from(self.losses) + 0.5 * f64::from(self.ties)
    }

    /// Score in half points, so comparisons stay exact.
    fn half_points(&self) -> u32 {
        2 * self.wins + self.ties
    }

    /// Apply one game from this player's point of view.
    pub fn record_game(&mut self, own_score: i64, opp_score: i64, moved_first: bool) {
        let delta = own_score - opp_score;
        self.spread += delta;
        match delta.cmp(&0) {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
        if moved_first {
            self.starts += 1;
        }
    }
}

/// Standings order: score descending, then spread descending.
///
/// `Ordering::Less` means `a` ranks above `b`; `Equal` is a genuine tie.
pub fn standings_order(a: &Player, b: &Player) -> Ordering {
    b.half_points()
        .cmp(&a.half_points())
        .then_with(|| b.spread.cmp(&a.spread))
}
