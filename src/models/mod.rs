//! Data structures for the pairing engine: players, results, roster, round plan, errors.

mod entrant;
mod error;
mod game;
mod player;
mod round;

pub use entrant::{Entrant, FixedPairingDirective, PairingTarget, Roster};
pub use error::TournamentError;
pub use game::{GameResult, Pairing};
pub use player::{is_bye, standings_order, Player, BYE};
pub use round::{PairingFormat, RoundPlan, RoundSpec};
