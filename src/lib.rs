//! Board-game tournament pairings: library with models and pairing logic.
//!
//! Reported results and the entrant roster go in; standings and the pairings for
//! every round up to the next pairable one come out, under King/Queen-of-the-hill,
//! round robin, quads, Charlottesville or Swiss formats.

pub mod config;
pub mod ingest;
pub mod logic;
pub mod models;

pub use config::{EngineConfig, SwissConfig};
pub use logic::{
    fixed, pair_charlottesville, pair_clustered_quads, pair_distributed_quads, pair_evans_quads,
    pair_king_of_the_hill, pair_queen_of_the_hill, pair_round_robin, pair_swiss, pair_swiss_initial,
    report, simulate, standings_as_of, BlossomMatcher, Ledger, Matcher, MatchingError, PairingContext,
    RepeatTracker, RoundFailure, RoundPairings, Tournament, TournamentReport, WeightedEdge,
};
pub use models::{
    is_bye, standings_order, Entrant, FixedPairingDirective, GameResult, Pairing, PairingFormat,
    PairingTarget, Player, RoundPlan, RoundSpec, Roster, TournamentError, BYE,
};
