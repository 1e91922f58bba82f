//! The consolidated per-chunk super-match table.

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};

/// Written in place of a secondary ID when a catalogue has no counterpart
pub const NO_MATCH: &str = "N/A";

/// Written in place of the worst-catalogue name when no catalogue is flagged
pub const NO_WORST: &str = "N/A";

/// Ordered primary-catalogue IDs of one chunk
pub type PrimaryIdList = Vec<String>;

/// Running probability bookkeeping of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityState {
    /// Product of every contribution seen so far
    pub cumulative_probability: f64,
    /// Index of the catalogue currently flagged as worst
    pub worst_catalogue: Option<usize>,
    /// Product of every contribution except the worst catalogue's
    pub probability_excluding_worst: f64,
}

impl Default for ProbabilityState {
    fn default() -> Self {
        Self {
            cumulative_probability: 1.0,
            worst_catalogue: None,
            probability_excluding_worst: 1.0,
        }
    }
}

/// One output row, keyed by a primary-catalogue ID
#[derive(Debug, Clone, PartialEq)]
pub struct SuperMatchRow {
    pub primary_id: String,
    /// One slot per catalogue, `None` meaning no match
    pub secondary_ids: SmallVec<[Option<String>; 4]>,
    pub probability: ProbabilityState,
}

impl SuperMatchRow {
    fn new(primary_id: String, n_catalogues: usize) -> Self {
        Self {
            primary_id,
            secondary_ids: smallvec![None; n_catalogues],
            probability: ProbabilityState::default(),
        }
    }

    #[must_use]
    pub fn cumulative_probability(&self) -> f64 {
        self.probability.cumulative_probability
    }

    #[must_use]
    pub fn probability_excluding_worst(&self) -> f64 {
        self.probability.probability_excluding_worst
    }

    #[must_use]
    pub fn worst_catalogue(&self) -> Option<usize> {
        self.probability.worst_catalogue
    }
}

/// Super-match rows of one chunk, in primary-ID order, with an ID index
#[derive(Debug, Clone)]
pub struct SuperMatchTable {
    catalogue_names: Vec<String>,
    rows: Vec<SuperMatchRow>,
    index: FxHashMap<String, usize>,
    duplicate_ids: Vec<String>,
}

impl SuperMatchTable {
    /// Create a table with one default row per primary ID.
    ///
    /// A primary ID that occurs more than once keeps its first row in the
    /// index; later copies are still written out but never receive
    /// contributions.
    #[must_use]
    pub fn new(primary_ids: PrimaryIdList, catalogue_names: Vec<String>) -> Self {
        let n_catalogues = catalogue_names.len();
        let mut index =
            FxHashMap::with_capacity_and_hasher(primary_ids.len(), Default::default());
        let mut duplicate_ids = Vec::new();
        let mut rows = Vec::with_capacity(primary_ids.len());

        for (position, primary_id) in primary_ids.into_iter().enumerate() {
            if index.contains_key(&primary_id) {
                duplicate_ids.push(primary_id.clone());
            } else {
                index.insert(primary_id.clone(), position);
            }
            rows.push(SuperMatchRow::new(primary_id, n_catalogues));
        }

        Self {
            catalogue_names,
            rows,
            index,
            duplicate_ids,
        }
    }

    /// Row position of a primary ID
    #[must_use]
    pub fn row_index(&self, primary_id: &str) -> Option<usize> {
        self.index.get(primary_id).copied()
    }

    pub(crate) fn row_mut(&mut self, position: usize) -> &mut SuperMatchRow {
        &mut self.rows[position]
    }

    #[must_use]
    pub fn rows(&self) -> &[SuperMatchRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, primary_id: &str) -> Option<&SuperMatchRow> {
        self.row_index(primary_id).map(|position| &self.rows[position])
    }

    #[must_use]
    pub fn catalogue_names(&self) -> &[String] {
        &self.catalogue_names
    }

    /// Primary IDs listed more than once, in order of their repeat
    #[must_use]
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the worst catalogue of a row, if one is flagged
    #[must_use]
    pub fn worst_catalogue_name(&self, row: &SuperMatchRow) -> Option<&str> {
        row.worst_catalogue()
            .and_then(|c| self.catalogue_names.get(c))
            .map(String::as_str)
    }

    /// Output fields of every row: primary ID, one secondary ID per
    /// catalogue, cumulative probability, worst catalogue, probability
    /// excluding the worst catalogue.
    pub fn record_lines(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(move |row| {
            let mut fields = Vec::with_capacity(row.secondary_ids.len() + 4);
            fields.push(row.primary_id.clone());
            fields.extend(
                row.secondary_ids
                    .iter()
                    .map(|id| id.as_deref().unwrap_or(NO_MATCH).to_string()),
            );
            fields.push(format_probability(row.cumulative_probability()));
            fields.push(self.worst_catalogue_name(row).unwrap_or(NO_WORST).to_string());
            fields.push(format_probability(row.probability_excluding_worst()));
            fields
        })
    }
}

/// Shortest round-trip representation, keeping `.0` on integral values
#[must_use]
pub fn format_probability(value: f64) -> String {
    format!("{value:?}")
}
