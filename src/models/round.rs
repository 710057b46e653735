//! Per-round pairing formats and the round plan parsed from the format table.

use crate::ingest::RoundRow;
use crate::models::error::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a round is paired.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingFormat {
    /// `K`: 1v2, 3v4, ...
    KingOfTheHill,
    /// `Q`: 1v3, 2v4, 5v7, 6v8, ...
    QueenOfTheHill,
    /// `R#`: one game of a full round robin.
    RoundRobin,
    /// `QC#`: quads of adjacent ranks.
    ClusteredQuads,
    /// `QD#`: quads striped across the standings.
    DistributedQuads,
    /// `QE#`: striped quads over snake-folded standings.
    EvansQuads,
    /// `CH`: fixed two-group rotation over the roster seeding.
    Charlottesville,
    /// `S` / `ST`: Swiss with repeat avoidance.
    Swiss,
}

impl PairingFormat {
    /// Formats that balance first-move with a running count kept for this run only.
    pub fn uses_rotation_starts(self) -> bool {
        matches!(self, PairingFormat::RoundRobin | PairingFormat::Charlottesville)
    }
}

impl fmt::Display for PairingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PairingFormat::KingOfTheHill => "King of the hill",
            PairingFormat::QueenOfTheHill => "Queen of the hill",
            PairingFormat::RoundRobin => "Round robin",
            PairingFormat::ClusteredQuads => "Clustered quads",
            PairingFormat::DistributedQuads => "Distributed quads",
            PairingFormat::EvansQuads => "Evans quads",
            PairingFormat::Charlottesville => "Charlottesville",
            PairingFormat::Swiss => "Swiss",
        };
        f.write_str(s)
    }
}

/// How one round is paired and which standings seed it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSpec {
    pub round: u32,
    pub format: PairingFormat,
    /// Round whose final standings seed this pairing (0 = before any games).
    pub basis: u32,
    /// 1-based position inside a round-robin cycle or quad sequence.
    pub position: Option<usize>,
}

impl RoundSpec {
    pub fn new(round: u32, format: PairingFormat, basis: u32) -> Self {
        Self {
            round,
            format,
            basis,
            position: None,
        }
    }
}

/// Every planned round, keyed by round number.
#[derive(Clone, Debug, Default)]
pub struct RoundPlan {
    specs: BTreeMap<u32, RoundSpec>,
    /// Rounds whose format code could not be understood.
    invalid: BTreeMap<u32, TournamentError>,
}

impl RoundPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: RoundSpec) {
        self.invalid.remove(&spec.round);
        self.specs.insert(spec.round, spec);
    }

    /// Parse `(round, code)` rows. Rounds sharing a sequence code (`R1`, `QD2`, ...)
    /// become one cycle in ascending round order.
    pub fn from_rows(rows: &[RoundRow]) -> Self {
        let mut plan = Self::new();
        let mut sequences: BTreeMap<String, (PairingFormat, Vec<u32>)> = BTreeMap::new();

        for (i, row) in rows.iter().enumerate() {
            let Ok(round) = row.round.trim().parse::<u32>() else {
                log::warn!("round pairings row {}: ignoring round {:?}", i + 1, row.round);
                continue;
            };
            let code = row.format.trim();
            let format = match code {
                "K" => PairingFormat::KingOfTheHill,
                "Q" => PairingFormat::QueenOfTheHill,
                "CH" => PairingFormat::Charlottesville,
                "S" | "ST" => PairingFormat::Swiss,
                _ if code.starts_with("QD") => PairingFormat::DistributedQuads,
                _ if code.starts_with("QC") => PairingFormat::ClusteredQuads,
                _ if code.starts_with("QE") => PairingFormat::EvansQuads,
                _ if code.starts_with('R') => PairingFormat::RoundRobin,
                _ => {
                    plan.invalid.insert(
                        round,
                        TournamentError::UnknownFormat {
                            round,
                            code: code.to_string(),
                        },
                    );
                    continue;
                }
            };
            match format {
                PairingFormat::RoundRobin
                | PairingFormat::ClusteredQuads
                | PairingFormat::DistributedQuads
                | PairingFormat::EvansQuads => {
                    sequences
                        .entry(code.to_string())
                        .or_insert_with(|| (format, Vec::new()))
                        .1
                        .push(round);
                }
                PairingFormat::Charlottesville => plan.insert(RoundSpec::new(round, format, 0)),
                PairingFormat::Swiss if code == "ST" => {
                    plan.insert(RoundSpec::new(round, format, round.saturating_sub(2)))
                }
                _ => plan.insert(RoundSpec::new(round, format, round.saturating_sub(1))),
            }
        }

        for (format, mut rounds) in sequences.into_values() {
            rounds.sort_unstable();
            rounds.dedup();
            let basis = rounds[0].saturating_sub(1);
            for (i, &round) in rounds.iter().enumerate() {
                plan.insert(RoundSpec {
                    position: Some(i + 1),
                    ..RoundSpec::new(round, format, basis)
                });
            }
        }
        plan
    }

    /// Spec for `round`, the stored format error, or `MissingRoundSpec`.
    pub fn get(&self, round: u32) -> Result<&RoundSpec, TournamentError> {
        if let Some(spec) = self.specs.get(&round) {
            return Ok(spec);
        }
        Err(self
            .invalid
            .get(&round)
            .cloned()
            .unwrap_or(TournamentError::MissingRoundSpec(round)))
    }

    /// Largest planned round whose basis round has been played (0 if none).
    /// Rounds with an unreadable format count as based on the previous round.
    pub fn last_pairable_round(&self, last_reported: u32) -> u32 {
        let valid = self
            .specs
            .values()
            .filter(|s| s.basis <= last_reported)
            .map(|s| s.round);
        let invalid = self
            .invalid
            .keys()
            .copied()
            .filter(|&r| r.saturating_sub(1) <= last_reported);
        valid.chain(invalid).max().unwrap_or(0)
    }

    pub fn specs(&self) -> impl Iterator<Item = &RoundSpec> {
        self.specs.values()
    }
}
