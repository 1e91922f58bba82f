//! Per-catalogue, per-chunk cross-match results.

/// A positive association between one primary and one secondary source
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntry {
    pub primary_id: String,
    pub secondary_id: String,
    pub probability: f64,
}

/// A primary source confirmed to have no counterpart in a catalogue
#[derive(Debug, Clone, PartialEq)]
pub struct NonMatchEntry {
    pub primary_id: String,
    pub probability: f64,
}

/// All matches of one catalogue within one chunk, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub entries: Vec<MatchEntry>,
}

/// All non-matches of one catalogue within one chunk, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonMatchRecord {
    pub entries: Vec<NonMatchEntry>,
}

impl MatchRecord {
    #[must_use]
    pub fn new(entries: Vec<MatchEntry>) -> Self {
        Self { entries }
    }

    /// Build a record from `(primary_id, secondary_id, probability)` triples
    pub fn from_triples<P, S>(triples: impl IntoIterator<Item = (P, S, f64)>) -> Self
    where
        P: Into<String>,
        S: Into<String>,
    {
        Self::new(
            triples
                .into_iter()
                .map(|(primary_id, secondary_id, probability)| MatchEntry {
                    primary_id: primary_id.into(),
                    secondary_id: secondary_id.into(),
                    probability,
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NonMatchRecord {
    #[must_use]
    pub fn new(entries: Vec<NonMatchEntry>) -> Self {
        Self { entries }
    }

    /// Build a record from `(primary_id, probability)` pairs
    pub fn from_pairs<P>(pairs: impl IntoIterator<Item = (P, f64)>) -> Self
    where
        P: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(primary_id, probability)| NonMatchEntry {
                    primary_id: primary_id.into(),
                    probability,
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Match and non-match results of one secondary catalogue for one chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueRecords {
    pub matches: MatchRecord,
    pub non_matches: NonMatchRecord,
}

impl CatalogueRecords {
    #[must_use]
    pub fn new(matches: MatchRecord, non_matches: NonMatchRecord) -> Self {
        Self {
            matches,
            non_matches,
        }
    }
}
