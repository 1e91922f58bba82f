//! Multi-catalogue super-matches.
//!
//! Merges the pairwise cross-matches of one primary catalogue against
//! several secondary catalogues into one table per data chunk: a row per
//! primary source with every catalogue's matched ID, the combined match
//! probability, and the catalogue (if any) dragging that probability below
//! [`BAD_PROBABILITY_THRESHOLD`].

pub mod algorithm;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod loader;
pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod writer;

// Re-export the most common types for easier use
pub use algorithm::{BAD_PROBABILITY_THRESHOLD, apply_contribution, merge_chunk};
pub use config::{CatalogueConfig, SuperMatchConfig};
pub use dispatcher::{ChunkTask, build_tasks, run_tasks};
pub use error::{Result, SuperMatchError};
pub use loader::{load_catalogue_column, load_match_record, load_non_match_record};
pub use models::{
    CatalogueRecords, MatchRecord, NonMatchRecord, ProbabilityState, SuperMatchRow,
    SuperMatchTable,
};
pub use orchestrator::{ChunkOutcome, RunSummary, SuperMatch};
pub use writer::write_super_match;
