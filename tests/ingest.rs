//! Integration tests for reading the CSV tables into a roster and round plan.

use tourney_pairings::{
    ingest::{self, EntrantRow, FixedPairingRow, RoundRow},
    EngineConfig, FixedPairingDirective, PairingFormat, PairingTarget, RoundPlan, Roster, Tournament,
    TournamentError,
};

fn round_rows(items: &[(&str, &str)]) -> Vec<RoundRow> {
    items
        .iter()
        .map(|(round, format)| RoundRow {
            round: round.to_string(),
            format: format.to_string(),
        })
        .collect()
}

fn entrant(name: &str, seed: &str) -> EntrantRow {
    EntrantRow {
        name: name.into(),
        seed: seed.into(),
        ..EntrantRow::default()
    }
}

#[test]
fn results_are_read_by_position_and_short_rows_are_padded() {
    let csv = "Round,Winner,W score,Loser,L score,Winner first?\n\
               1, Alice ,420,Bob,380,first\n\
               \n\
               2,Carol,400,Dave,390\n";
    let rows = ingest::read_results(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].winner, "Alice");
    assert_eq!(rows[0].winner_first, "first");
    assert_eq!(rows[1].loser_score, "390");
    assert_eq!(rows[1].winner_first, "");
}

#[test]
fn entrants_build_a_seeded_roster() {
    let csv = "name,rating,table,seed\nZed,1200,,2\nAmy,1500,7,1\n,,,\n";
    let rows = ingest::read_entrants(csv.as_bytes()).unwrap();
    let roster = Roster::from_rows(&rows, &[]).unwrap();
    let names: Vec<&str> = roster.seeding().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
    assert_eq!(roster.display_name("Amy"), "Amy (#1)");
    assert_eq!(roster.fixed_table("Amy"), Some(7));
    assert_eq!(roster.fixed_table("Zed"), None);
    assert_eq!(roster.entrant("Zed").map(|e| e.rating), Some(1200));
    assert_eq!(roster.display_name("Stranger"), "Stranger");
}

#[test]
fn duplicate_seeds_and_bad_numbers_are_rejected() {
    let dup = [entrant("A", "1"), entrant("B", "1")];
    assert_eq!(Roster::from_rows(&dup, &[]).unwrap_err(), TournamentError::DuplicateSeed(1));

    let bad = [entrant("A", "first")];
    assert!(matches!(
        Roster::from_rows(&bad, &[]),
        Err(TournamentError::Parse { table: "entrants", field: "seed", .. })
    ));
}

#[test]
fn fixed_pairing_sides_accept_names_and_standings() {
    assert_eq!(PairingTarget::parse("#2"), Some(PairingTarget::Standing(2)));
    assert_eq!(PairingTarget::parse("Amy (#1)"), Some(PairingTarget::Name("Amy".into())));
    assert_eq!(PairingTarget::parse(" Zed "), Some(PairingTarget::Name("Zed".into())));
    assert_eq!(PairingTarget::parse("#top"), None);

    let fixed = [
        FixedPairingRow {
            round: "3".into(),
            side1: "Amy (#1)".into(),
            side2: "#2".into(),
        },
        FixedPairingRow {
            round: "later".into(),
            side1: "Amy".into(),
            side2: "Zed".into(),
        },
    ];
    let roster = Roster::from_rows(&[entrant("Amy", "1"), entrant("Zed", "2")], &fixed).unwrap();
    assert_eq!(
        roster.fixed_pairings(3),
        &[FixedPairingDirective::new(
            PairingTarget::Name("Amy".into()),
            PairingTarget::Standing(2)
        )]
    );
    assert!(roster.fixed_pairings(1).is_empty());
}

#[test]
fn sequence_codes_number_their_rounds_in_order() {
    let plan = RoundPlan::from_rows(&round_rows(&[("5", "R1"), ("3", "R1"), ("4", "R1"), ("6", "QD")]));
    for (round, position) in [(3, 1), (4, 2), (5, 3)] {
        let spec = plan.get(round).unwrap();
        assert_eq!(spec.format, PairingFormat::RoundRobin);
        assert_eq!(spec.basis, 2);
        assert_eq!(spec.position, Some(position));
    }
    let quads = plan.get(6).unwrap();
    assert_eq!((quads.format, quads.basis, quads.position), (PairingFormat::DistributedQuads, 5, Some(1)));
}

#[test]
fn two_sequences_with_the_same_format_stay_separate() {
    let plan = RoundPlan::from_rows(&round_rows(&[("1", "R1"), ("2", "R1"), ("3", "R1"), ("4", "R2"), ("5", "R2")]));
    assert_eq!(plan.get(4).unwrap().basis, 3);
    assert_eq!(plan.get(5).unwrap().position, Some(2));
}

#[test]
fn swiss_basis_and_lag() {
    let plan = RoundPlan::from_rows(&round_rows(&[("1", "S"), ("2", "ST"), ("3", "ST"), ("4", "CH"), ("5", "K")]));
    assert_eq!(plan.get(1).unwrap().basis, 0);
    assert_eq!(plan.get(2).unwrap().basis, 0);
    assert_eq!(plan.get(3).unwrap().basis, 1);
    assert_eq!(plan.get(4).unwrap().basis, 0);
    assert_eq!(plan.get(5).unwrap().basis, 4);
    // ST rounds can be paired one round early.
    assert_eq!(plan.last_pairable_round(1), 4);
    assert_eq!(plan.last_pairable_round(4), 5);
}

#[test]
fn unknown_codes_and_gaps() {
    let plan = RoundPlan::from_rows(&round_rows(&[("1", "K"), ("2", "Z9"), ("x", "K")]));
    assert_eq!(
        plan.get(2).unwrap_err(),
        TournamentError::UnknownFormat {
            round: 2,
            code: "Z9".into()
        }
    );
    assert_eq!(plan.get(3).unwrap_err(), TournamentError::MissingRoundSpec(3));
    assert_eq!(plan.specs().count(), 1);
}

#[test]
fn tournament_from_rows_rejects_bad_results() {
    let results = ingest::read_results("r,w,ws,l,ls,f\n1,A,400,B,300,maybe\n".as_bytes()).unwrap();
    let entrants = [entrant("A", "1"), entrant("B", "2")];
    let err = Tournament::from_rows(&results, &entrants, &[], &[], EngineConfig::default()).unwrap_err();
    assert!(matches!(err, TournamentError::Parse { table: "results", field: "winner_first", .. }));
}

#[test]
fn custom_test_player_is_ignored() {
    let results = ingest::read_results("r,w,ws,l,ls,f\n1,Dummy,400,B,300,first\n1,A,400,B,300,first\n".as_bytes()).unwrap();
    let config = EngineConfig {
        test_player: "Dummy".into(),
        ..EngineConfig::default()
    };
    let entrants = [entrant("A", "1"), entrant("B", "2")];
    let t = Tournament::from_rows(&results, &entrants, &round_rows(&[("1", "K")]), &[], config).unwrap();
    assert_eq!(t.ledger.results().len(), 1);
}

#[test]
fn config_fills_in_missing_fields() {
    let config: EngineConfig = serde_json::from_str(r#"{"swiss":{"repeat_weight":50}}"#).unwrap();
    assert_eq!(config.swiss.repeat_weight, 50);
    assert_eq!(config.swiss.max_distance, 11);
    assert_eq!(config.test_player, "Test Player");
}
