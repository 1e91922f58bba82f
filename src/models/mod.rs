//! Data model for super-match tables and their per-catalogue inputs.

pub mod records;
pub mod table;

pub use records::{CatalogueRecords, MatchEntry, MatchRecord, NonMatchEntry, NonMatchRecord};
pub use table::{
    NO_MATCH, NO_WORST, PrimaryIdList, ProbabilityState, SuperMatchRow, SuperMatchTable,
    format_probability,
};
