//! TournamentError: everything that can go wrong loading inputs or pairing a round.

use crate::logic::MatchingError;
use crate::models::round::PairingFormat;

/// Errors that can occur while loading inputs or generating pairings.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A cell in an input table could not be parsed.
    #[error("{table} row {row}: invalid {field} {value:?}")]
    Parse {
        table: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },
    /// Two entrants share a seed.
    #[error("seed {0} is assigned to more than one entrant")]
    DuplicateSeed(u32),
    /// The round-pairing table names a format code we do not know.
    #[error("round {round}: unknown pairing format {code:?}")]
    UnknownFormat { round: u32, code: String },
    /// A round is pairable but nothing says how to pair it.
    #[error("round {0}: no results and no pairing format")]
    MissingRoundSpec(u32),
    /// The field size does not fit the format (odd field, quad remainder of 1 or 3, ...).
    #[error("{format} cannot pair a field of {players} players")]
    FieldSize { format: PairingFormat, players: usize },
    /// The rotation/quad position is outside the format's cycle.
    #[error("{format} has no position {position}")]
    InvalidPosition { format: PairingFormat, position: usize },
    /// A fixed pairing names a standing position past the end of the standings.
    #[error("fixed pairing refers to standing #{position} but only {players} players are ranked")]
    StandingOutOfRange { position: usize, players: usize },
    /// A fixed pairing names a player who is not in the standings.
    #[error("fixed pairing refers to unknown player {0:?}")]
    UnknownPlayer(String),
    /// A player is forced into more than one fixed pairing in the same round.
    #[error("player {0:?} appears in more than one fixed pairing")]
    ConflictingFixedPairing(String),
    /// Swiss escalation ran past every useful repeat allowance.
    #[error("no Swiss pairing for a bracket of {players} players even allowing {max_repeats} repeats")]
    MatchingExhausted { players: usize, max_repeats: u32 },
    #[error("matching failed: {0}")]
    Matching(#[from] MatchingError),
}

impl TournamentError {
    /// Configuration problems are fatal for one round but not for the run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TournamentError::UnknownFormat { .. }
                | TournamentError::MissingRoundSpec(_)
                | TournamentError::FieldSize { .. }
                | TournamentError::InvalidPosition { .. }
                | TournamentError::StandingOutOfRange { .. }
                | TournamentError::UnknownPlayer(_)
                | TournamentError::ConflictingFixedPairing(_)
                | TournamentError::DuplicateSeed(_)
        )
    }
}
