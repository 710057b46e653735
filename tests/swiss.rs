//! Integration tests for Swiss pairing: brackets, repeat avoidance and escalation.

use std::collections::HashSet;
use tourney_pairings::{
    pair_swiss, pair_swiss_initial, BlossomMatcher, Entrant, Pairing, Player, RepeatTracker, Roster, SwissConfig,
    TournamentError,
};

fn player(name: &str, wins: u32) -> Player {
    Player {
        wins,
        ..Player::new(name)
    }
}

fn pair_names(pairings: &[Pairing]) -> HashSet<(String, String)> {
    pairings
        .iter()
        .map(|p| (p.first.clone(), p.second.clone()))
        .collect()
}

fn expected(items: &[(&str, &str)]) -> HashSet<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn initial_round_pairs_top_half_against_bottom_half() {
    let roster = Roster::new(
        ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, n)| Entrant::new(*n, i as u32 + 1))
            .collect(),
    )
    .unwrap();
    let pairings = pair_swiss_initial(&roster).unwrap();
    assert_eq!(pair_names(&pairings), expected(&[("A", "C"), ("B", "D")]));
}

#[test]
fn pairs_neighbours_when_nobody_has_met() {
    let standings: Vec<Player> = ["A", "B", "C", "D", "E", "F"].iter().map(|n| player(n, 1)).collect();
    let pairings = pair_swiss(standings, &RepeatTracker::new(), &SwissConfig::default(), &BlossomMatcher).unwrap();
    assert_eq!(pair_names(&pairings), expected(&[("A", "B"), ("C", "D"), ("E", "F")]));
    assert!(pairings.iter().all(|p| p.repeats == 0));
}

#[test]
fn avoids_repeats_when_an_alternative_exists() {
    let standings: Vec<Player> = ["A", "B", "C", "D", "E", "F"].iter().map(|n| player(n, 1)).collect();
    let mut repeats = RepeatTracker::new();
    for (a, b) in [("A", "B"), ("C", "D"), ("E", "F")] {
        repeats.add(a, b);
    }
    let pairings = pair_swiss(standings, &repeats, &SwissConfig::default(), &BlossomMatcher).unwrap();
    assert_eq!(pairings.len(), 3);
    assert!(pairings.iter().all(|p| p.repeats == 0));
    let seen: HashSet<&str> = pairings
        .iter()
        .flat_map(|p| [p.first.as_str(), p.second.as_str()])
        .collect();
    assert_eq!(seen.len(), 6);
}

#[test]
fn allows_a_repeat_when_everyone_has_met() {
    let standings: Vec<Player> = ["A", "B", "C", "D"].iter().map(|n| player(n, 1)).collect();
    let mut repeats = RepeatTracker::new();
    for (a, b) in [("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")] {
        repeats.add(a, b);
    }
    let pairings = pair_swiss(standings, &repeats, &SwissConfig::default(), &BlossomMatcher).unwrap();
    assert_eq!(pair_names(&pairings), expected(&[("A", "B"), ("C", "D")]));
    assert!(pairings.iter().all(|p| p.repeats == 1));
}

#[test]
fn pairs_within_score_groups() {
    let standings = vec![
        player("W1", 2),
        player("W2", 2),
        player("L1", 1),
        player("L2", 1),
        player("L3", 1),
        player("L4", 1),
        player("L5", 1),
        player("L6", 1),
    ];
    let mut repeats = RepeatTracker::new();
    repeats.add("L1", "L2");
    let pairings = pair_swiss(standings, &repeats, &SwissConfig::default(), &BlossomMatcher).unwrap();
    let got = pair_names(&pairings);
    assert!(got.contains(&("W1".to_string(), "W2".to_string())));
    assert!(!got.contains(&("L1".to_string(), "L2".to_string())));
    assert_eq!(pairings.len(), 4);
}

#[test]
fn promotes_the_bottom_of_the_next_bracket_when_a_player_is_isolated() {
    let standings = vec![
        player("W1", 2),
        player("W2", 2),
        player("L1", 1),
        player("L2", 1),
        player("L3", 1),
        player("L4", 1),
        player("L5", 1),
        player("L6", 1),
    ];
    let mut repeats = RepeatTracker::new();
    repeats.add("W1", "W2");
    repeats.add("W1", "L6");
    let pairings = pair_swiss(standings, &repeats, &SwissConfig::default(), &BlossomMatcher).unwrap();
    // L5 and L6 join the top bracket; L1 to L4 pair among themselves.
    assert_eq!(
        pair_names(&pairings),
        expected(&[("L5", "W1"), ("L6", "W2"), ("L1", "L2"), ("L3", "L4")])
    );
}

fn assert_disjoint(pairings: &[Pairing], players: usize) {
    let seen: HashSet<&str> = pairings
        .iter()
        .flat_map(|p| [p.first.as_str(), p.second.as_str()])
        .collect();
    assert_eq!(seen.len(), players);
    assert_eq!(pairings.len() * 2, players);
}

#[test]
fn pairs_a_bracket_of_more_than_a_hundred_players() {
    let standings: Vec<Player> = (0..260)
        .map(|i| player(&format!("P{i:03}"), u32::from(i < 130)))
        .collect();
    let pairings = pair_swiss(standings, &RepeatTracker::new(), &SwissConfig::default(), &BlossomMatcher).unwrap();
    assert_disjoint(&pairings, 260);
    assert!(pairings.iter().all(|p| p.repeats == 0));
    // Nobody crosses from the one-win bracket into the zero-win one.
    assert!(pairings
        .iter()
        .all(|p| (p.first.as_str() < "P130") == (p.second.as_str() < "P130")));
}

#[test]
fn wide_distance_still_pairs_neighbours() {
    let standings: Vec<Player> = (0..40).map(|i| player(&format!("P{i:02}"), 0)).collect();
    let config = SwissConfig {
        max_distance: 40,
        ..SwissConfig::default()
    };
    let pairings = pair_swiss(standings, &RepeatTracker::new(), &config, &BlossomMatcher).unwrap();
    assert_disjoint(&pairings, 40);
    let want: HashSet<(String, String)> = (0..20)
        .map(|k| (format!("P{:02}", 2 * k), format!("P{:02}", 2 * k + 1)))
        .collect();
    assert_eq!(pair_names(&pairings), want);
}

#[test]
fn odd_bracket_hands_a_player_down() {
    let standings = vec![
        player("A", 2),
        player("B", 2),
        player("C", 2),
        player("D", 1),
        player("E", 1),
        player("F", 1),
        player("G", 1),
        player("H", 1),
    ];
    let config = SwissConfig {
        min_bottom_group: 2,
        ..SwissConfig::default()
    };
    let pairings = pair_swiss(standings, &RepeatTracker::new(), &config, &BlossomMatcher).unwrap();
    // Brackets {A,B} and {C,D,E,F,G,H}.
    assert_eq!(
        pair_names(&pairings),
        expected(&[("A", "B"), ("C", "D"), ("E", "F"), ("G", "H")])
    );
}

#[test]
fn exhausted_when_no_candidate_is_close_enough() {
    let standings: Vec<Player> = ["A", "B", "C", "D"].iter().map(|n| player(n, 0)).collect();
    let config = SwissConfig {
        max_distance: 1,
        ..SwissConfig::default()
    };
    let err = pair_swiss(standings, &RepeatTracker::new(), &config, &BlossomMatcher).unwrap_err();
    assert!(matches!(err, TournamentError::MatchingExhausted { players: 4, .. }));
}

#[test]
fn odd_field_is_rejected() {
    let standings: Vec<Player> = ["A", "B", "C"].iter().map(|n| player(n, 0)).collect();
    assert!(matches!(
        pair_swiss(standings, &RepeatTracker::new(), &SwissConfig::default(), &BlossomMatcher),
        Err(TournamentError::FieldSize { players: 3, .. })
    ));
}
