//! Delimited catalogue file loading
//!
//! Catalogue and cross-match files are comma-separated with no header row.
//! Columns are addressed by zero-based index.

use std::path::Path;

use csv::ReaderBuilder;
use itertools::Itertools;
use log::debug;

use crate::error::util::safe_open_file;
use crate::error::{Result, SuperMatchError};
use crate::models::{MatchEntry, MatchRecord, NonMatchEntry, NonMatchRecord};

/// Field delimiter of every input and output file
pub const DELIMITER: u8 = b',';

/// Read the given columns of every row of a headerless delimited file
fn read_columns<const N: usize>(
    path: &Path,
    columns: [usize; N],
    purpose: &str,
) -> Result<Vec<[String; N]>> {
    let file = safe_open_file(path, purpose)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, &column) in values.iter_mut().zip(columns.iter()) {
            *value = record
                .get(column)
                .ok_or_else(|| SuperMatchError::ColumnIndex {
                    path: path.to_path_buf(),
                    column,
                    width: record.len(),
                    row,
                })?
                .to_string();
        }
        rows.push(values);
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn parse_probability(path: &Path, row: usize, column: usize, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| SuperMatchError::InvalidValue {
            path: path.to_path_buf(),
            row,
            column,
            value: value.to_string(),
        })
}

/// Load a single column from a catalogue on disk, one value per row
pub fn load_catalogue_column(path: &Path, column: usize) -> Result<Vec<String>> {
    Ok(read_columns(path, [column], "loading a catalogue column")?
        .into_iter()
        .map(|[value]| value)
        .collect_vec())
}

/// Load a single column and parse every value as a probability
pub fn load_probability_column(path: &Path, column: usize) -> Result<Vec<f64>> {
    load_catalogue_column(path, column)?
        .iter()
        .enumerate()
        .map(|(row, value)| parse_probability(path, row, column, value))
        .collect()
}

/// Load a catalogue's match table for one chunk
pub fn load_match_record(
    path: &Path,
    primary_column: usize,
    secondary_column: usize,
    probability_column: usize,
) -> Result<MatchRecord> {
    let entries = read_columns(
        path,
        [primary_column, secondary_column, probability_column],
        "loading matches",
    )?
    .into_iter()
    .enumerate()
    .map(|(row, [primary_id, secondary_id, probability])| {
        Ok(MatchEntry {
            probability: parse_probability(path, row, probability_column, &probability)?,
            primary_id,
            secondary_id,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    Ok(MatchRecord::new(entries))
}

/// Load a catalogue's primary non-match table for one chunk
pub fn load_non_match_record(
    path: &Path,
    primary_column: usize,
    probability_column: usize,
) -> Result<NonMatchRecord> {
    let entries = read_columns(
        path,
        [primary_column, probability_column],
        "loading non-matches",
    )?
    .into_iter()
    .enumerate()
    .map(|(row, [primary_id, probability])| {
        Ok(NonMatchEntry {
            probability: parse_probability(path, row, probability_column, &probability)?,
            primary_id,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    Ok(NonMatchRecord::new(entries))
}
