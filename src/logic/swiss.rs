//! Swiss pairing: pair within score groups, avoiding repeats and long standings jumps.
//!
//! Brackets are paired top-down. For the top bracket a candidate graph is built from
//! pairs that have met fewer than `allowed` times and handed to a [`Matcher`]. When a
//! player has no candidate the next bracket's bottom two are pulled up; when the
//! matcher cannot pair everyone the repeat allowance goes up. Each bracket starts
//! again at an allowance of one.

use crate::config::SwissConfig;
use crate::logic::{Matcher, RepeatTracker, WeightedEdge};
use crate::models::{Pairing, PairingFormat, Player, Roster, TournamentError};
use std::collections::BTreeMap;

/// First round: top half of the seeding against the bottom half, 1 v n/2+1, ...
pub fn pair_swiss_initial(roster: &Roster) -> Result<Vec<Pairing>, TournamentError> {
    let seeding = roster.seeding();
    if seeding.len() % 2 != 0 {
        return Err(TournamentError::FieldSize {
            format: PairingFormat::Swiss,
            players: seeding.len(),
        });
    }
    let half = seeding.len() / 2;
    Ok((0..half)
        .map(|i| Pairing::new(seeding[i].name.as_str(), seeding[i + half].name.as_str()))
        .collect())
}

/// Players bucketed by wins, best first. An odd bracket hands its lowest player
/// down to the next one.
fn score_groups(standings: Vec<Player>) -> Vec<Vec<Player>> {
    let mut by_wins: BTreeMap<u32, Vec<Player>> = BTreeMap::new();
    for p in standings {
        by_wins.entry(p.wins).or_default().push(p);
    }
    let mut groups: Vec<Vec<Player>> = by_wins.into_values().rev().collect();
    for i in 0..groups.len().saturating_sub(1) {
        if groups[i].len() % 2 != 0 {
            if let Some(p) = groups[i].pop() {
                groups[i + 1].insert(0, p);
            }
        }
    }
    groups.retain(|g| !g.is_empty());
    groups
}

/// Fold undersized bottom brackets into the one above.
fn merge_bottom(groups: &mut Vec<Vec<Player>>, min_size: usize) {
    while groups.len() > 1 && groups.last().map_or(false, |g| g.len() < min_size) {
        if let Some(bottom) = groups.pop() {
            if let Some(above) = groups.last_mut() {
                above.extend(bottom);
            }
        }
    }
}

/// Move the bottom two players of the following brackets into the top bracket,
/// keeping them in standings order.
fn promote_bottom_two(groups: &mut Vec<Vec<Player>>) {
    let mut promoted = Vec::with_capacity(2);
    let mut same_group = true;
    while promoted.len() < 2 && groups.len() > 1 {
        match groups[1].pop() {
            Some(p) => {
                log::debug!("promoting {} into the top bracket", p.name);
                if same_group {
                    promoted.insert(0, p);
                } else {
                    promoted.push(p);
                }
            }
            None => {
                groups.remove(1);
                same_group = false;
                continue;
            }
        }
        if groups[1].is_empty() {
            groups.remove(1);
            same_group = false;
        }
    }
    if let Some(top) = groups.first_mut() {
        top.extend(promoted);
    }
}

/// For each player, the bracket-mates they may still meet: `(index, repeats)`.
fn candidates(group: &[Player], repeats: &RepeatTracker, allowed: u32) -> Vec<Vec<(usize, u32)>> {
    group
        .iter()
        .enumerate()
        .map(|(i, a)| {
            group
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, b)| (j, repeats.get(&a.name, &b.name)))
                .filter(|&(_, reps)| reps < allowed)
                .collect()
        })
        .collect()
}

fn max_repeats_within(group: &[Player], repeats: &RepeatTracker) -> u32 {
    let mut max = 0;
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            max = max.max(repeats.get(&a.name, &b.name));
        }
    }
    max
}

/// Pair a field (fixed pairings already removed) in standings order.
///
/// Returned pairings have the lower name first and carry the pre-round repeat count.
pub fn pair_swiss(
    standings: Vec<Player>,
    repeats: &RepeatTracker,
    config: &SwissConfig,
    matcher: &dyn Matcher,
) -> Result<Vec<Pairing>, TournamentError> {
    let field = standings.len();
    if field % 2 != 0 {
        return Err(TournamentError::FieldSize {
            format: PairingFormat::Swiss,
            players: field,
        });
    }
    let mut groups = score_groups(standings);
    merge_bottom(&mut groups, config.min_bottom_group);
    log::debug!(
        "swiss brackets: {:?}",
        groups.iter().map(|g| g.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()).collect::<Vec<_>>()
    );

    let mut pairings = Vec::with_capacity(field / 2);
    let mut allowed: u32 = 1;
    while !groups.is_empty() {
        let top = &groups[0];
        let lists = candidates(top, repeats, allowed);

        let feasible = !lists.iter().any(Vec::is_empty);
        let mates = if feasible {
            let mut edges = Vec::new();
            for (i, list) in lists.iter().enumerate() {
                for &(j, reps) in list {
                    let distance = i.abs_diff(j);
                    if i < j && distance < config.max_distance {
                        let weight = config
                            .repeat_weight
                            .saturating_mul(i64::from(reps))
                            .saturating_add(distance as i64)
                            .saturating_neg();
                        edges.push(WeightedEdge::new(i, j, weight));
                    }
                }
            }
            Some(matcher.solve(top.len(), &edges)?)
        } else {
            None
        };

        match mates {
            Some(mates) if mates.iter().all(Option::is_some) => {
                for (i, mate) in mates.iter().enumerate() {
                    if let Some(j) = *mate {
                        if i < j {
                            let mut p = Pairing::canonical(&top[i].name, &top[j].name);
                            p.repeats = repeats.get(&p.first, &p.second);
                            pairings.push(p);
                        }
                    }
                }
                groups.remove(0);
                allowed = 1;
            }
            None if groups.len() > 1 => {
                log::debug!("isolated player in top bracket at {} allowed repeats", allowed);
                promote_bottom_two(&mut groups);
                if groups.len() == 1 {
                    allowed = escalate(&groups[0], repeats, allowed, field)?;
                }
            }
            _ => {
                allowed = escalate(&groups[0], repeats, allowed, field)?;
            }
        }
    }
    Ok(pairings)
}

/// Allow one more repeat, or give up once every pair in the bracket was already allowed.
fn escalate(group: &[Player], repeats: &RepeatTracker, allowed: u32, field: usize) -> Result<u32, TournamentError> {
    let limit = (field as u32).max(max_repeats_within(group, repeats) + 1);
    if allowed >= limit {
        return Err(TournamentError::MatchingExhausted {
            players: group.len(),
            max_repeats: allowed,
        });
    }
    log::debug!("raising allowed repeats to {}", allowed + 1);
    Ok(allowed + 1)
}
