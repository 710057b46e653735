//! Result ledger: reported games replayed into player aggregates and a per-round index.

use crate::ingest::{parse_field, ResultRow};
use crate::models::{GameResult, Pairing, Player, TournamentError};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Every reported game, plus the aggregates derived from them.
///
/// Players are kept in order of first appearance so that ties in the standings
/// always break the same way for the same input.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    results: Vec<GameResult>,
    players: Vec<Player>,
    index: HashMap<String, usize>,
    rounds: BTreeMap<u32, Vec<GameResult>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse result rows and replay them in input order.
    ///
    /// Rows with an unreadable or zero round, and rows involving `test_player`, are
    /// skipped. Unreadable scores or first-move flags are errors.
    pub fn record(rows: &[ResultRow], test_player: &str) -> Result<Self, TournamentError> {
        const TABLE: &str = "results";
        let mut ledger = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let line = i + 1;
            let round = match row.round.trim().parse::<u32>() {
                Ok(r) if r >= 1 => r,
                _ => {
                    log::warn!("results row {}: ignoring round {:?}", line, row.round);
                    continue;
                }
            };
            let winner = row.winner.trim();
            let loser = row.loser.trim();
            if winner == test_player || loser == test_player {
                continue;
            }
            let winner_first = match row.winner_first.trim().to_ascii_lowercase().as_str() {
                "first" => true,
                "second" | "" => false,
                _ => {
                    return Err(TournamentError::Parse {
                        table: TABLE,
                        row: line,
                        field: "winner_first",
                        value: row.winner_first.clone(),
                    })
                }
            };
            ledger.add_generated_result(GameResult {
                round,
                winner: winner.to_string(),
                winner_score: parse_field(TABLE, line, "winner_score", &row.winner_score)?,
                loser: loser.to_string(),
                loser_score: parse_field(TABLE, line, "loser_score", &row.loser_score)?,
                winner_first,
            });
        }
        log::debug!(
            "recorded {} results over {} rounds",
            ledger.results.len(),
            ledger.rounds.len()
        );
        Ok(ledger)
    }

    /// Replay already-parsed results into a fresh ledger.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a GameResult>) -> Self {
        let mut ledger = Self::new();
        for r in results {
            ledger.add_generated_result(r.clone());
        }
        ledger
    }

    /// Append one result and update both players.
    pub fn add_generated_result(&mut self, result: GameResult) {
        let (ws, ls) = (result.winner_score, result.loser_score);
        self.player_mut(&result.winner)
            .record_game(ws, ls, result.winner_first);
        self.player_mut(&result.loser)
            .record_game(ls, ws, !result.winner_first);
        self.rounds
            .entry(result.round)
            .or_default()
            .push(result.clone());
        self.results.push(result);
    }

    fn player_mut(&mut self, name: &str) -> &mut Player {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.players.push(Player::new(name));
                self.index.insert(name.to_string(), self.players.len() - 1);
                self.players.len() - 1
            }
        };
        &mut self.players[i]
    }

    /// Aggregate for `name`; a zero-stat player if they have no games.
    pub fn player_stats(&self, name: &str) -> Player {
        self.index
            .get(name)
            .map(|&i| self.players[i].clone())
            .unwrap_or_else(|| Player::new(name))
    }

    /// Players with at least one game, in order of first appearance.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Rounds with results, always including 0 ("before any round").
    pub fn rounds_played(&self) -> BTreeSet<u32> {
        std::iter::once(0).chain(self.rounds.keys().copied()).collect()
    }

    pub fn last_round(&self) -> u32 {
        self.rounds.keys().next_back().copied().unwrap_or(0)
    }

    pub fn has_round(&self, round: u32) -> bool {
        self.rounds.contains_key(&round)
    }

    /// Pairings as they were actually played in `round`.
    pub fn pairings_of(&self, round: u32) -> Vec<Pairing> {
        self.rounds
            .get(&round)
            .map(|games| {
                games
                    .iter()
                    .map(|g| Pairing {
                        first_starts: g.winner_first,
                        ..Pairing::new(g.winner.as_str(), g.loser.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
