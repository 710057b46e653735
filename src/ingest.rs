//! CSV ingestion of the four input tables (results, entrants, round formats, fixed pairings).
//!
//! Every table has a header row; columns are read by position so header wording
//! does not matter. Cells stay as strings here and are validated by the ledger and
//! roster, which know which failures are fatal.

use crate::models::TournamentError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// `round, winner, winner_score, loser, loser_score, winner_first`
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub round: String,
    pub winner: String,
    pub winner_score: String,
    pub loser: String,
    pub loser_score: String,
    /// `first` or `second`.
    pub winner_first: String,
}

/// `name, rating, table, seed`
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntrantRow {
    pub name: String,
    pub rating: String,
    pub table: String,
    pub seed: String,
}

/// `round, format`
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRow {
    pub round: String,
    pub format: String,
}

/// `round, side1, side2`
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixedPairingRow {
    pub round: String,
    pub side1: String,
    pub side2: String,
}

/// Input could not be read as CSV at all.
#[derive(thiserror::Error, Debug)]
#[error("{table}: {source}")]
pub struct IngestError {
    pub table: &'static str,
    #[source]
    pub source: csv::Error,
}

/// Read every record as a vector of `width` cells (short rows padded with blanks).
fn read_cells<R: Read>(table: &'static str, reader: R, width: usize) -> Result<Vec<Vec<String>>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| IngestError { table, source })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cells = (0..width)
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

pub fn read_results<R: Read>(reader: R) -> Result<Vec<ResultRow>, IngestError> {
    Ok(read_cells("results", reader, 6)?
        .into_iter()
        .map(|mut c| ResultRow {
            winner_first: std::mem::take(&mut c[5]),
            loser_score: std::mem::take(&mut c[4]),
            loser: std::mem::take(&mut c[3]),
            winner_score: std::mem::take(&mut c[2]),
            winner: std::mem::take(&mut c[1]),
            round: std::mem::take(&mut c[0]),
        })
        .collect())
}

pub fn read_entrants<R: Read>(reader: R) -> Result<Vec<EntrantRow>, IngestError> {
    Ok(read_cells("entrants", reader, 4)?
        .into_iter()
        .map(|mut c| EntrantRow {
            seed: std::mem::take(&mut c[3]),
            table: std::mem::take(&mut c[2]),
            rating: std::mem::take(&mut c[1]),
            name: std::mem::take(&mut c[0]),
        })
        .collect())
}

pub fn read_round_specs<R: Read>(reader: R) -> Result<Vec<RoundRow>, IngestError> {
    Ok(read_cells("round pairings", reader, 2)?
        .into_iter()
        .map(|mut c| RoundRow {
            format: std::mem::take(&mut c[1]),
            round: std::mem::take(&mut c[0]),
        })
        .collect())
}

pub fn read_fixed_pairings<R: Read>(reader: R) -> Result<Vec<FixedPairingRow>, IngestError> {
    Ok(read_cells("fixed pairings", reader, 3)?
        .into_iter()
        .map(|mut c| FixedPairingRow {
            side2: std::mem::take(&mut c[2]),
            side1: std::mem::take(&mut c[1]),
            round: std::mem::take(&mut c[0]),
        })
        .collect())
}

/// Parse a required cell, reporting table/row/field on failure.
pub(crate) fn parse_field<T: FromStr>(
    table: &'static str,
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<T, TournamentError> {
    value.trim().parse().map_err(|_| TournamentError::Parse {
        table,
        row,
        field,
        value: value.to_string(),
    })
}

/// Like [`parse_field`] but a blank cell is `None`.
pub(crate) fn parse_optional_field<T: FromStr>(
    table: &'static str,
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<Option<T>, TournamentError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_field(table, row, field, value).map(Some)
}
