//! Per-chunk super-match merge
//!
//! Folds the match and non-match records of every secondary catalogue into
//! one row per primary ID. Each contribution multiplies the row's cumulative
//! probability, and the single catalogue pulling the row furthest below
//! [`BAD_PROBABILITY_THRESHOLD`] is tracked as the row's worst catalogue.

use log::warn;

use crate::error::{Result, SuperMatchError};
use crate::models::{CatalogueRecords, PrimaryIdList, ProbabilityState, SuperMatchTable};

/// Contributions below this probability can flag a catalogue as worst
pub const BAD_PROBABILITY_THRESHOLD: f64 = 0.5;

/// Fold one catalogue's contributed probability into a row's state.
///
/// The catalogue becomes the worst when its probability is below both the
/// threshold and the current probability excluding the worst catalogue.
/// A probability equal to the current excluding-worst value leaves the
/// flagged catalogue unchanged.
#[must_use]
pub fn apply_contribution(
    state: ProbabilityState,
    probability: f64,
    catalogue: usize,
) -> ProbabilityState {
    let cumulative_probability = state.cumulative_probability * probability;

    if probability < state.probability_excluding_worst && probability < BAD_PROBABILITY_THRESHOLD {
        // Divides out only this contribution; a previous worst catalogue
        // stays in the product.
        ProbabilityState {
            cumulative_probability,
            worst_catalogue: Some(catalogue),
            probability_excluding_worst: cumulative_probability / probability,
        }
    } else {
        ProbabilityState {
            cumulative_probability,
            worst_catalogue: state.worst_catalogue,
            probability_excluding_worst: state.probability_excluding_worst * probability,
        }
    }
}

/// Merge every catalogue's records for one chunk into a super-match table.
///
/// `records` must be in the same order as `catalogue_names`; catalogues are
/// processed in that order. Rows follow `primary_ids`.
pub fn merge_chunk(
    primary_ids: PrimaryIdList,
    catalogue_names: Vec<String>,
    records: &[CatalogueRecords],
) -> Result<SuperMatchTable> {
    if records.len() != catalogue_names.len() {
        return Err(SuperMatchError::Config(format!(
            "{} catalogue names but {} catalogue records",
            catalogue_names.len(),
            records.len()
        )));
    }

    let mut table = SuperMatchTable::new(primary_ids, catalogue_names);
    if !table.duplicate_ids().is_empty() {
        warn!(
            "{} duplicated primary IDs; contributions go to the first occurrence (first: {})",
            table.duplicate_ids().len(),
            table.duplicate_ids()[0]
        );
    }

    let mut covered = vec![false; table.len()];
    for (catalogue, catalogue_records) in records.iter().enumerate() {
        covered.fill(false);

        for entry in &catalogue_records.matches.entries {
            let position = resolve(&table, &entry.primary_id, catalogue)?;
            let row = table.row_mut(position);
            row.secondary_ids[catalogue] = Some(entry.secondary_id.clone());
            row.probability = apply_contribution(row.probability, entry.probability, catalogue);
            covered[position] = true;
        }

        for entry in &catalogue_records.non_matches.entries {
            let position = resolve(&table, &entry.primary_id, catalogue)?;
            let row = table.row_mut(position);
            row.secondary_ids[catalogue] = None;
            row.probability = apply_contribution(row.probability, entry.probability, catalogue);
            covered[position] = true;
        }

        let uncovered = covered.iter().filter(|c| !**c).count();
        if uncovered > 0 {
            warn!(
                "Catalogue {} has neither a match nor a non-match for {} of {} primary IDs",
                table.catalogue_names()[catalogue],
                uncovered,
                table.len()
            );
        }
    }

    Ok(table)
}

fn resolve(table: &SuperMatchTable, primary_id: &str, catalogue: usize) -> Result<usize> {
    table
        .row_index(primary_id)
        .ok_or_else(|| SuperMatchError::UnknownId {
            id: primary_id.to_string(),
            catalogue: table.catalogue_names()[catalogue].clone(),
        })
}
