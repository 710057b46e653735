//! King-of-the-hill and queen-of-the-hill pairing over current standings.

use crate::models::{PairingFormat, Pairing, Player, TournamentError};

fn pair(standings: &[Player], a: usize, b: usize) -> Pairing {
    Pairing::new(standings[a].name.as_str(), standings[b].name.as_str())
}

/// 1v2, 3v4, 5v6, ...
pub fn pair_king_of_the_hill(standings: &[Player]) -> Result<Vec<Pairing>, TournamentError> {
    if standings.len() % 2 != 0 {
        return Err(TournamentError::FieldSize {
            format: PairingFormat::KingOfTheHill,
            players: standings.len(),
        });
    }
    Ok((0..standings.len())
        .step_by(2)
        .map(|i| pair(standings, i, i + 1))
        .collect())
}

/// 1v3, 2v4, 5v7, 6v8, ...
///
/// With 4k+2 players the last six play 1v4, 2v5, 3v6 among themselves instead.
pub fn pair_queen_of_the_hill(standings: &[Player]) -> Result<Vec<Pairing>, TournamentError> {
    let n = standings.len();
    let quads_end = match n % 4 {
        0 => n,
        2 if n >= 6 => n - 6,
        _ => {
            return Err(TournamentError::FieldSize {
                format: PairingFormat::QueenOfTheHill,
                players: n,
            })
        }
    };
    let mut pairings = Vec::with_capacity(n / 2);
    for i in (0..quads_end).step_by(4) {
        pairings.push(pair(standings, i, i + 2));
        pairings.push(pair(standings, i + 1, i + 3));
    }
    if quads_end < n {
        for k in 0..3 {
            pairings.push(pair(standings, quads_end + k, quads_end + k + 3));
        }
    }
    Ok(pairings)
}
