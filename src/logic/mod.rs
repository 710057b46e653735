//! Pairing engine: ledger, standings, fixed pairings, per-format pairing, orchestration.

mod charlottesville;
pub mod fixed;
mod hill;
mod ledger;
mod matching;
mod orchestrator;
mod quads;
mod repeats;
pub mod report;
mod round_robin;
pub mod simulate;
mod standings;
mod swiss;

pub use charlottesville::pair_charlottesville;
pub use hill::{pair_king_of_the_hill, pair_queen_of_the_hill};
pub use ledger::Ledger;
pub use matching::{BlossomMatcher, Matcher, MatchingError, WeightedEdge};
pub use orchestrator::{PairingContext, RoundFailure, RoundPairings, Tournament, TournamentReport};
pub use quads::{pair_clustered_quads, pair_distributed_quads, pair_evans_quads};
pub use repeats::RepeatTracker;
pub use round_robin::pair_round_robin;
pub use standings::standings_as_of;
pub use swiss::{pair_swiss, pair_swiss_initial};
