//! Round robin by the circle method.

use crate::models::{PairingFormat, Pairing, Player, TournamentError};

/// Seat indices for meeting `r` (0-based) of an `n`-player cycle.
///
/// Seat 0 stays put, seats 1..n rotate one place per meeting; the rotated circle is
/// cut in half and the second half reversed so column `i` of each half meet.
fn circle(n: usize, r: usize) -> (Vec<usize>, Vec<usize>) {
    let mut ring: Vec<usize> = (1..n).collect();
    ring.rotate_left((n - 1 - r) % (n - 1));
    let seats: Vec<usize> = std::iter::once(0).chain(ring).collect();
    let half = n / 2;
    let top = seats[..half].to_vec();
    let bottom = seats[half..].iter().rev().copied().collect();
    (top, bottom)
}

/// Game `position` (1-based) of a round robin over `seeding`.
///
/// `seeding` must be the standings at the start of the cycle, not the current ones,
/// or players would shift seats mid-cycle. Odd fields need a bye entrant.
pub fn pair_round_robin(seeding: &[Player], position: usize) -> Result<Vec<Pairing>, TournamentError> {
    let n = seeding.len();
    if n < 2 || n % 2 != 0 {
        return Err(TournamentError::FieldSize {
            format: PairingFormat::RoundRobin,
            players: n,
        });
    }
    if position == 0 || position > n - 1 {
        return Err(TournamentError::InvalidPosition {
            format: PairingFormat::RoundRobin,
            position,
        });
    }
    let (top, bottom) = circle(n, position - 1);
    Ok(top
        .iter()
        .zip(&bottom)
        .map(|(&a, &b)| Pairing::new(seeding[a].name.as_str(), seeding[b].name.as_str()))
        .collect())
}
