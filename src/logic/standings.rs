//! Standings as of any round, reconciled against the current roster.

use crate::logic::Ledger;
use crate::models::{standings_order, Player, Roster};
use std::collections::HashSet;

/// Ranked players after `round`.
///
/// Round 0 is the roster in seed order with no games. Later rounds replay only the
/// results up to `round` into a fresh ledger (the canonical one is never touched),
/// drop players who have left the roster, and append entrants with no games yet in
/// seed order.
pub fn standings_as_of(ledger: &Ledger, roster: &Roster, round: u32) -> Vec<Player> {
    if round == 0 {
        return roster.seeding().iter().map(|e| Player::new(e.name.as_str())).collect();
    }
    let replay = Ledger::from_results(ledger.results().iter().filter(|r| r.round <= round));
    let mut standings: Vec<Player> = replay
        .players()
        .iter()
        .filter(|p| roster.contains(&p.name))
        .cloned()
        .collect();
    // Stable: equal players keep first-appearance order.
    standings.sort_by(standings_order);

    let present: HashSet<String> = standings.iter().map(|p| p.name.clone()).collect();
    standings.extend(
        roster
            .seeding()
            .iter()
            .filter(|e| !present.contains(&e.name))
            .map(|e| Player::new(e.name.as_str())),
    );
    standings
}
