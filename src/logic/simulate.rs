//! Random results for generated pairings, to drive whole tournaments in tests and dry runs.

use crate::logic::Ledger;
use crate::models::{GameResult, Pairing};
use rand::Rng;

const LOW_SCORE: i64 = 250;
const HIGH_SCORE: i64 = 550;

/// Play every pairing of `round` with random scores and record the results.
///
/// Scores are redrawn until they differ, so simulated games never tie.
pub fn play_round<R: Rng + ?Sized>(ledger: &mut Ledger, round: u32, pairings: &[Pairing], rng: &mut R) {
    for p in pairings {
        let (a, b) = loop {
            let a = rng.gen_range(LOW_SCORE..=HIGH_SCORE);
            let b = rng.gen_range(LOW_SCORE..=HIGH_SCORE);
            if a != b {
                break (a, b);
            }
        };
        let first_won = a > b;
        let (winner, loser) = if first_won {
            (&p.first, &p.second)
        } else {
            (&p.second, &p.first)
        };
        ledger.add_generated_result(GameResult {
            round,
            winner: winner.clone(),
            winner_score: a.max(b),
            loser: loser.clone(),
            loser_score: a.min(b),
            winner_first: p.first_starts == first_won,
        });
    }
}
