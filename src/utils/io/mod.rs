//! IO utilities for chunked catalogue layouts

pub mod chunks;

pub use chunks::{
    SUPER_MATCH_SUFFIX, cross_match_chunk_folder, discover_chunks, primary_chunk_path,
    super_match_output_path,
};
