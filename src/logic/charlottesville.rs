//! Charlottesville: two snake-split groups, each player meeting the other group in turn.
//!
//! Group 1 holds seeds 1, 4, 5, 8, 9, ...; group 2 holds 2, 3, 6, 7, 10, ... reversed
//! so the top seed meets seed 2 last. Always paired from the roster seeding.

use crate::models::{PairingFormat, Pairing, Roster, TournamentError};

/// Round `round` (1-based) of the two-group rotation over the roster seeding.
pub fn pair_charlottesville(roster: &Roster, round: u32) -> Result<Vec<Pairing>, TournamentError> {
    let seeding = roster.seeding();
    let (mut group1, mut group2) = (Vec::new(), Vec::new());
    for (i, entrant) in seeding.iter().enumerate() {
        if matches!((i + 1) % 4, 0 | 1) {
            group1.push(entrant);
        } else {
            group2.push(entrant);
        }
    }
    if group1.is_empty() || group1.len() != group2.len() {
        return Err(TournamentError::FieldSize {
            format: PairingFormat::Charlottesville,
            players: seeding.len(),
        });
    }
    if round == 0 {
        return Err(TournamentError::InvalidPosition {
            format: PairingFormat::Charlottesville,
            position: 0,
        });
    }
    group2.reverse();
    let shift = (round as usize - 1) % group2.len();
    group2.rotate_left(shift);
    Ok(group1
        .iter()
        .zip(&group2)
        .map(|(a, b)| Pairing::new(a.name.as_str(), b.name.as_str()))
        .collect())
}
