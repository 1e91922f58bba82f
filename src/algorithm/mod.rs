//! Algorithms for combining pairwise cross-matches.

pub mod merge;

pub use merge::{BAD_PROBABILITY_THRESHOLD, apply_contribution, merge_chunk};
