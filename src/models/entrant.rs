//! Entrants, the seeded roster, and tournament-director fixed pairings.

use crate::ingest::{parse_field, parse_optional_field, EntrantRow, FixedPairingRow};
use crate::models::error::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One registered participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    /// Match key used in results and pairings.
    pub name: String,
    pub display_name: String,
    pub rating: i32,
    /// Table this entrant always plays at (e.g. for accessibility).
    pub table: Option<u32>,
    /// 1-based initial rank.
    pub seed: u32,
}

impl Entrant {
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        let name = name.into();
        Self {
            display_name: format!("{} (#{})", name, seed),
            name,
            rating: 0,
            table: None,
            seed,
        }
    }

    fn from_row(index: usize, row: &EntrantRow) -> Result<Self, TournamentError> {
        const TABLE: &str = "entrants";
        let seed: u32 = parse_field(TABLE, index, "seed", &row.seed)?;
        let rating: i32 = parse_optional_field(TABLE, index, "rating", &row.rating)?.unwrap_or(0);
        let table: Option<u32> = parse_optional_field(TABLE, index, "table", &row.table)?;
        Ok(Self {
            rating,
            table,
            ..Self::new(row.name.trim(), seed)
        })
    }
}

/// One side of a fixed pairing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingTarget {
    /// A literal player name.
    Name(String),
    /// Whoever holds this 1-based place in the standings at pairing time.
    Standing(usize),
}

impl PairingTarget {
    /// `#3` is standing position 3; anything else is a name, minus a trailing `" (...)"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(digits) = raw.strip_prefix('#') {
            return digits.trim().parse().ok().map(PairingTarget::Standing);
        }
        let name = match raw.find(" (") {
            Some(i) => &raw[..i],
            None => raw,
        };
        Some(PairingTarget::Name(name.trim_end().to_string()))
    }
}

/// Pairing forced by the tournament director for one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixedPairingDirective {
    pub first: PairingTarget,
    pub second: PairingTarget,
}

impl FixedPairingDirective {
    pub fn new(first: PairingTarget, second: PairingTarget) -> Self {
        Self { first, second }
    }
}

/// Seed-ordered participants plus per-round fixed pairings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    seeding: Vec<Entrant>,
    index: HashMap<String, usize>,
    fixed_pairings: BTreeMap<u32, Vec<FixedPairingDirective>>,
}

impl Roster {
    /// Build a roster from entrants in any order. Seeds must be unique.
    pub fn new(mut entrants: Vec<Entrant>) -> Result<Self, TournamentError> {
        entrants.sort_by_key(|e| e.seed);
        if let Some(w) = entrants.windows(2).find(|w| w[0].seed == w[1].seed) {
            return Err(TournamentError::DuplicateSeed(w[0].seed));
        }
        let index = entrants
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Ok(Self {
            seeding: entrants,
            index,
            fixed_pairings: BTreeMap::new(),
        })
    }

    /// Parse entrant rows and fixed-pairing rows. Fixed-pairing rows with an
    /// unparseable round are dropped; bad sides are errors.
    pub fn from_rows(
        entrant_rows: &[EntrantRow],
        fixed_rows: &[FixedPairingRow],
    ) -> Result<Self, TournamentError> {
        let entrants = entrant_rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.name.trim().is_empty())
            .map(|(i, row)| Entrant::from_row(i + 1, row))
            .collect::<Result<Vec<_>, _>>()?;
        let mut roster = Self::new(entrants)?;

        for (i, row) in fixed_rows.iter().enumerate() {
            let Ok(round) = row.round.trim().parse::<u32>() else {
                log::warn!("fixed pairings row {}: ignoring round {:?}", i + 1, row.round);
                continue;
            };
            let side = |field: &'static str, value: &str| {
                PairingTarget::parse(value).ok_or_else(|| TournamentError::Parse {
                    table: "fixed pairings",
                    row: i + 1,
                    field,
                    value: value.to_string(),
                })
            };
            let directive = FixedPairingDirective::new(side("side1", &row.side1)?, side("side2", &row.side2)?);
            roster.add_fixed_pairing(round, directive);
        }
        Ok(roster)
    }

    pub fn add_fixed_pairing(&mut self, round: u32, directive: FixedPairingDirective) {
        self.fixed_pairings.entry(round).or_default().push(directive);
    }

    /// Fixed pairings for `round` (empty if none).
    pub fn fixed_pairings(&self, round: u32) -> &[FixedPairingDirective] {
        self.fixed_pairings.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entrants in seed order.
    pub fn seeding(&self) -> &[Entrant] {
        &self.seeding
    }

    pub fn len(&self) -> usize {
        self.seeding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeding.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn entrant(&self, name: &str) -> Option<&Entrant> {
        self.index.get(name).map(|&i| &self.seeding[i])
    }

    /// Display name for `name`, or the name itself for unknown players.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.entrant(name).map(|e| e.display_name.as_str()).unwrap_or(name)
    }

    /// Pre-assigned table for `name`, if any.
    pub fn fixed_table(&self, name: &str) -> Option<u32> {
        self.entrant(name).and_then(|e| e.table)
    }

    /// Every table claimed by some entrant.
    pub fn fixed_tables(&self) -> impl Iterator<Item = u32> + '_ {
        self.seeding.iter().filter_map(|e| e.table)
    }
}
