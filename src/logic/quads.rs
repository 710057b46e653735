//! Quad formats: groups of four playing a three-round mini round robin.
//!
//! A field of 4k+2 leaves one trailing "hex" of six that plays a three-round
//! incomplete round robin instead. The quad sequence position (1..=3) picks the round.

use crate::models::{PairingFormat, Pairing, Player, TournamentError};

const QUAD_ROUNDS: [[(usize, usize); 2]; 3] = [
    [(0, 3), (1, 2)],
    [(0, 2), (1, 3)],
    [(0, 1), (2, 3)],
];

const HEX_ROUNDS: [[(usize, usize); 3]; 3] = [
    [(0, 1), (2, 3), (4, 5)],
    [(0, 2), (3, 4), (1, 5)],
    [(0, 3), (1, 4), (2, 5)],
];

/// Number of leading standings that go into quads; the rest (0 or 6) form the hex.
fn quad_limit(format: PairingFormat, n: usize) -> Result<usize, TournamentError> {
    match n % 4 {
        0 => Ok(n),
        2 if n >= 6 => Ok(n - 6),
        _ => Err(TournamentError::FieldSize { format, players: n }),
    }
}

fn check_position(format: PairingFormat, position: usize) -> Result<usize, TournamentError> {
    if (1..=3).contains(&position) {
        Ok(position - 1)
    } else {
        Err(TournamentError::InvalidPosition { format, position })
    }
}

fn pair_groups(groups: &[Vec<&Player>], round: usize) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    for group in groups {
        let pairs: &[(usize, usize)] = if group.len() == 4 {
            &QUAD_ROUNDS[round][..]
        } else {
            &HEX_ROUNDS[round][..]
        };
        for &(a, b) in pairs {
            pairings.push(Pairing::new(group[a].name.as_str(), group[b].name.as_str()));
        }
    }
    pairings
}

/// Deal `ordered[..limit]` into `limit / 4` quads round-robin style, then add the hex.
fn striped<'a>(ordered: &[&'a Player], standings: &'a [Player], limit: usize) -> Vec<Vec<&'a Player>> {
    let stride = limit / 4;
    let mut groups: Vec<Vec<&Player>> = vec![Vec::with_capacity(4); stride];
    for (i, &p) in ordered.iter().take(limit).enumerate() {
        groups[i % stride].push(p);
    }
    push_hex(&mut groups, standings, limit);
    groups
}

fn push_hex<'a>(groups: &mut Vec<Vec<&'a Player>>, standings: &'a [Player], limit: usize) {
    if limit < standings.len() {
        groups.push(standings[limit..].iter().collect());
    }
}

/// Ranks 1-4, 5-8, ... form the quads.
pub fn pair_clustered_quads(standings: &[Player], position: usize) -> Result<Vec<Pairing>, TournamentError> {
    let format = PairingFormat::ClusteredQuads;
    let round = check_position(format, position)?;
    let limit = quad_limit(format, standings.len())?;
    let mut groups: Vec<Vec<&Player>> = standings[..limit]
        .chunks(4)
        .map(|c| c.iter().collect())
        .collect();
    push_hex(&mut groups, standings, limit);
    Ok(pair_groups(&groups, round))
}

/// Rank i joins quad `i mod (quad count)`, spreading strength across quads.
pub fn pair_distributed_quads(standings: &[Player], position: usize) -> Result<Vec<Pairing>, TournamentError> {
    let format = PairingFormat::DistributedQuads;
    let round = check_position(format, position)?;
    let limit = quad_limit(format, standings.len())?;
    let ordered: Vec<&Player> = standings.iter().collect();
    Ok(pair_groups(&striped(&ordered, standings, limit), round))
}

/// Distributed quads over standings folded snake-style, so opponents' seed sums even out.
///
/// With 12 players the quads are dealt from 1 2 3 6 5 4 7 8 9 12 11 10.
pub fn pair_evans_quads(standings: &[Player], position: usize) -> Result<Vec<Pairing>, TournamentError> {
    let format = PairingFormat::EvansQuads;
    let round = check_position(format, position)?;
    let limit = quad_limit(format, standings.len())?;
    let stride = limit / 4;
    let mut ordered: Vec<&Player> = Vec::with_capacity(limit);
    if stride > 0 {
        for (block, chunk) in standings[..limit].chunks(stride).enumerate() {
            if block % 2 == 1 {
                ordered.extend(chunk.iter().rev());
            } else {
                ordered.extend(chunk.iter());
            }
        }
    }
    Ok(pair_groups(&striped(&ordered, standings, limit), round))
}
