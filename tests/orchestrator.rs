//! End-to-end tests: tables in, standings and per-round pairings out.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tourney_pairings::{
    ingest, report, simulate, EngineConfig, BlossomMatcher, PairingContext, PairingFormat, Tournament,
    TournamentError, TournamentReport,
};

fn tournament(results: &str, entrants: &str, rounds: &str, fixed: &str) -> Tournament {
    let results = ingest::read_results(format!("round,winner,ws,loser,ls,first\n{results}").as_bytes()).unwrap();
    let entrants = ingest::read_entrants(format!("name,rating,table,seed\n{entrants}").as_bytes()).unwrap();
    let rounds = ingest::read_round_specs(format!("round,format\n{rounds}").as_bytes()).unwrap();
    let fixed = ingest::read_fixed_pairings(format!("round,side1,side2\n{fixed}").as_bytes()).unwrap();
    Tournament::from_rows(&results, &entrants, &rounds, &fixed, EngineConfig::default()).unwrap()
}

const FOUR: &str = "A,1500,,1\nB,1400,,2\nC,1300,,3\nD,1200,,4\n";

fn games(report: &TournamentReport, round: u32) -> HashSet<(String, String)> {
    report
        .rounds
        .iter()
        .find(|r| r.round == round)
        .unwrap()
        .pairings
        .iter()
        .map(|p| {
            let (a, b) = (p.first.clone(), p.second.clone());
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

fn set(items: &[(&str, &str)]) -> HashSet<(String, String)> {
    items.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
}

#[test]
fn only_rounds_with_a_known_basis_are_paired() {
    let t = tournament("", FOUR, "1,S\n2,S\n", "");
    let report = t.run(&BlossomMatcher);
    assert!(report.failure.is_none());
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.rounds[0].format, Some(PairingFormat::Swiss));
    assert_eq!(games(&report, 1), set(&[("A", "C"), ("B", "D")]));
}

#[test]
fn reported_rounds_are_replayed_and_the_next_one_generated() {
    let t = tournament("1,A,400,C,350,first\n1,B,380,D,300,first\n", FOUR, "1,S\n2,S\n", "");
    let report = t.run(&BlossomMatcher);
    assert!(report.failure.is_none());
    assert_eq!(report.rounds.len(), 2);

    let first = &report.rounds[0];
    assert!(first.replayed);
    assert_eq!(first.format, None);

    let second = &report.rounds[1];
    assert!(!second.replayed);
    assert_eq!(games(&report, 2), set(&[("A", "B"), ("C", "D")]));
    assert!(second.pairings.iter().all(|p| p.repeats == 1));
    // Both started once, so the lower name keeps first move; C and D never started.
    let starters: HashSet<&str> = second.pairings.iter().map(|p| p.in_start_order().0).collect();
    assert_eq!(starters, ["A", "C"].into_iter().collect());

    let names: Vec<&str> = report.standings.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B (#2)", "A (#1)", "C (#3)", "D (#4)"]);
    assert_eq!(report.standings[0].rank, 1);
    assert_eq!(report.standings[0].spread, 80);
}

#[test]
fn swiss_after_a_full_round_robin_repeats_and_says_so() {
    let results = "1,A,400,D,300,first\n1,B,400,C,300,first\n\
                   2,A,400,C,300,first\n2,B,400,D,300,first\n\
                   3,A,400,B,300,first\n3,C,400,D,300,first\n";
    let t = tournament(results, FOUR, "1,R1\n2,R1\n3,R1\n4,S\n", "");
    let report = t.run(&BlossomMatcher);
    assert!(report.failure.is_none());
    assert_eq!(report.rounds.len(), 4);
    assert_eq!(games(&report, 4), set(&[("A", "B"), ("C", "D")]));
    let last = &report.rounds[3];
    assert!(last.pairings.iter().all(|p| p.repeats == 2));
    assert!(last.table.iter().all(|row| row.repeat.as_deref() == Some("(rep 2)")));
}

#[test]
fn an_unpairable_round_stops_the_run_but_keeps_earlier_rounds() {
    let t = tournament("1,A,400,B,300,first\n1,C,400,D,300,first\n", FOUR, "1,K\n2,X\n3,K\n", "");
    let report = t.run(&BlossomMatcher);
    assert_eq!(report.rounds.len(), 1);
    let failure = report.failure.unwrap();
    assert_eq!(failure.round, 2);
    assert_eq!(
        failure.error,
        TournamentError::UnknownFormat {
            round: 2,
            code: "X".into()
        }
    );
    assert!(failure.error.is_configuration());
}

#[test]
fn reported_rounds_are_replayed_as_entered() {
    // A played twice in round 1; the results are shown as reported.
    let t = tournament("1,A,400,B,300,first\n1,A,400,C,300,first\n", FOUR, "1,K\n2,K\n", "");
    let report = t.run(&BlossomMatcher);
    let first = &report.rounds[0];
    assert!(first.replayed);
    assert_eq!(first.pairings.len(), 2);
    assert_eq!(games(&report, 1), set(&[("A", "B"), ("A", "C")]));
}

#[test]
fn missing_round_spec_is_reported() {
    let t = tournament("1,A,400,B,300,first\n1,C,400,D,300,first\n2,A,400,C,300,first\n2,B,400,D,300,first\n", FOUR, "1,K\n3,K\n", "");
    let report = t.run(&BlossomMatcher);
    // Rounds 1 and 2 replay from results; round 3 is generated.
    assert_eq!(report.rounds.len(), 3);
    assert!(report.failure.is_none());

    let gap = tournament("1,A,400,B,300,first\n1,C,400,D,300,first\n", FOUR, "1,K\n3,Q\n", "");
    let plan_round = gap.plan.last_pairable_round(gap.ledger.last_round());
    assert_eq!(plan_round, 1);
    let mut ctx = PairingContext::default();
    assert_eq!(
        gap.next_round(2, &mut ctx, &BlossomMatcher).unwrap_err(),
        TournamentError::MissingRoundSpec(2)
    );
}

#[test]
fn round_robin_alternates_first_move() {
    let t = tournament("", FOUR, "1,R1\n2,R1\n3,R1\n", "");
    let report = t.run(&BlossomMatcher);
    assert_eq!(report.rounds.len(), 3);
    let starters = |round: usize| -> HashSet<&str> {
        report.rounds[round]
            .pairings
            .iter()
            .map(|p| p.in_start_order().0)
            .collect()
    };
    assert_eq!(starters(0), ["A", "B"].into_iter().collect());
    assert_eq!(starters(1), ["C", "D"].into_iter().collect());
    assert_eq!(starters(2), ["A", "C"].into_iter().collect());
}

#[test]
fn the_bye_always_moves_first_and_never_ranks() {
    let t = tournament("", "A,,,1\nB,,,2\nC,,,3\nBye,,,4\n", "1,K\n", "");
    let report = t.run(&BlossomMatcher);
    let round = &report.rounds[0];
    let bye_game = round.pairings.iter().find(|p| p.involves("Bye")).unwrap();
    assert_eq!(bye_game.in_start_order(), ("Bye", "C"));
    assert_eq!(report.standings.len(), 3);
}

#[test]
fn fixed_pairings_are_pulled_out_before_pairing() {
    let t = tournament("", FOUR, "1,K\n", "1,A (#1),#4\n");
    let report = t.run(&BlossomMatcher);
    assert!(report.failure.is_none());
    assert_eq!(games(&report, 1), set(&[("B", "C"), ("A", "D")]));
}

#[test]
fn conflicting_fixed_pairings_fail_the_round() {
    let t = tournament("", FOUR, "1,K\n", "1,A,B\n1,C,A\n");
    let report = t.run(&BlossomMatcher);
    assert!(report.rounds.is_empty());
    assert_eq!(
        report.failure.unwrap().error,
        TournamentError::ConflictingFixedPairing("A".into())
    );
}

#[test]
fn fixed_tables_are_kept_and_the_rest_fill_in() {
    let t = tournament("", "A,,,1\nB,,,2\nC,,1,3\nD,,,4\n", "1,K\n", "");
    let report = t.run(&BlossomMatcher);
    let rows = &report.rounds[0].table;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].table, 1);
    assert_eq!((rows[0].first.as_str(), rows[0].second.as_str()), ("C (#3)", "D (#4)"));
    assert_eq!(rows[1].table, 2);
    assert_eq!((rows[1].first.as_str(), rows[1].second.as_str()), ("A (#1)", "B (#2)"));
    assert_eq!(rows[1].repeat, None);
}

#[test]
fn summary_lists_every_game() {
    let t = tournament("", FOUR, "1,K\n", "");
    let report = t.run(&BlossomMatcher);
    assert_eq!(report.rounds[0].summary, "ROUND 1: A v. B | C v. D");
    assert_eq!(report::summary_line(7, &[]), "ROUND 7: ");
}

#[test]
fn simulated_swiss_event_pairs_every_round() {
    let entrants: String = (1..=10).map(|i| format!("P{i},,,{i}\n")).collect();
    let rounds: String = (1..=6).map(|r| format!("{r},S\n")).collect();
    let mut t = tournament("", &entrants, &rounds, "");
    let mut rng = StdRng::seed_from_u64(7);

    for round in 1..=6 {
        let report = t.run(&BlossomMatcher);
        assert!(report.failure.is_none(), "round {round}: {:?}", report.failure);
        assert_eq!(report.rounds.len(), round as usize);
        let current = &report.rounds[round as usize - 1];
        assert_eq!(current.pairings.len(), 5);
        let players: HashSet<&str> = current
            .pairings
            .iter()
            .flat_map(|p| [p.first.as_str(), p.second.as_str()])
            .collect();
        assert_eq!(players.len(), 10);
        simulate::play_round(&mut t.ledger, round, &current.pairings, &mut rng);
    }
    assert_eq!(t.ledger.results().len(), 30);
    let wins: u32 = t.ledger.players().iter().map(|p| p.wins).sum();
    assert_eq!(wins, 30);
}
