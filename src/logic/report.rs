//! Rendering standings and pairings into rows for a display sink.

use crate::models::{is_bye, Pairing, Player, Roster};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One line of the public standings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    /// Losses plus half a point per tie.
    pub losses: f64,
    pub spread: i64,
    pub rating: i32,
}

/// One table of a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairingRow {
    pub table: u32,
    /// Display name of the player moving first.
    pub first: String,
    pub second: String,
    /// `(rep n)` when the pair has now met more than once.
    pub repeat: Option<String>,
}

/// Ranked rows for `standings` (already in standings order), without byes.
pub fn standings_table(standings: &[Player], roster: &Roster) -> Vec<StandingsRow> {
    standings
        .iter()
        .filter(|p| !is_bye(&p.name))
        .enumerate()
        .map(|(i, p)| StandingsRow {
            rank: i + 1,
            name: roster.display_name(&p.name).to_string(),
            score: p.score(),
            losses: p.losses_equivalent(),
            spread: p.spread,
            rating: roster.entrant(&p.name).map_or(0, |e| e.rating),
        })
        .collect()
}

/// Table rows sorted by table number.
///
/// A pairing involving an entrant with a fixed table plays there; the others take
/// the lowest numbers not claimed by any fixed table, in pairing order.
pub fn pairing_table(pairings: &[Pairing], roster: &Roster) -> Vec<PairingRow> {
    let claimed: HashSet<u32> = roster.fixed_tables().collect();
    let mut next_free = 1;
    let mut rows: Vec<PairingRow> = pairings
        .iter()
        .map(|p| {
            let table = roster
                .fixed_table(&p.first)
                .or_else(|| roster.fixed_table(&p.second))
                .unwrap_or_else(|| {
                    while claimed.contains(&next_free) {
                        next_free += 1;
                    }
                    next_free += 1;
                    next_free - 1
                });
            let (first, second) = p.in_start_order();
            PairingRow {
                table,
                first: roster.display_name(first).to_string(),
                second: roster.display_name(second).to_string(),
                repeat: (p.repeats > 1).then(|| format!("(rep {})", p.repeats)),
            }
        })
        .collect();
    rows.sort_by_key(|r| r.table);
    rows
}

/// `ROUND n: A v. B | C v. D`
pub fn summary_line(round: u32, pairings: &[Pairing]) -> String {
    let games: Vec<String> = pairings
        .iter()
        .map(|p| format!("{} v. {}", p.first, p.second))
        .collect();
    format!("ROUND {}: {}", round, games.join(" | "))
}
