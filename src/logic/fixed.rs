//! Fixed pairings: pull director-forced pairs out of the standings before a format runs.

use crate::models::{FixedPairingDirective, Pairing, PairingTarget, Player, TournamentError};
use std::collections::HashSet;

fn resolve_target(standings: &[Player], target: &PairingTarget) -> Result<String, TournamentError> {
    match target {
        PairingTarget::Name(name) => {
            if standings.iter().any(|p| &p.name == name) {
                Ok(name.clone())
            } else {
                Err(TournamentError::UnknownPlayer(name.clone()))
            }
        }
        PairingTarget::Standing(position) => position
            .checked_sub(1)
            .and_then(|i| standings.get(i))
            .map(|p| p.name.clone())
            .ok_or(TournamentError::StandingOutOfRange {
                position: *position,
                players: standings.len(),
            }),
    }
}

/// Split `standings` into the players left for the format and the forced pairings.
///
/// Every side resolves against the standings as passed in. A directive whose two
/// sides land on the same player is dropped; the same pair forced twice is emitted
/// once; a player forced against two different opponents is an error.
pub fn resolve(
    standings: Vec<Player>,
    directives: &[FixedPairingDirective],
) -> Result<(Vec<Player>, Vec<Pairing>), TournamentError> {
    if directives.is_empty() {
        return Ok((standings, Vec::new()));
    }
    let mut forced: Vec<Pairing> = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();
    for d in directives {
        let a = resolve_target(&standings, &d.first)?;
        let b = resolve_target(&standings, &d.second)?;
        if a == b {
            log::warn!("fixed pairing {:?} v {:?} resolves to {} twice, ignoring", d.first, d.second, a);
            continue;
        }
        let pairing = Pairing::canonical(&a, &b);
        if forced.contains(&pairing) {
            continue;
        }
        for name in [&a, &b] {
            if !taken.insert(name.clone()) {
                return Err(TournamentError::ConflictingFixedPairing(name.clone()));
            }
        }
        log::debug!("fixed pairing {} v {}", pairing.first, pairing.second);
        forced.push(pairing);
    }
    let remaining = standings
        .into_iter()
        .filter(|p| !taken.contains(&p.name))
        .collect();
    Ok((remaining, forced))
}
