//! Chunk folder discovery and per-chunk path derivation
//!
//! Chunk layout on disk:
//! - `<primary root>/<chunk>/<primary filename>`
//! - `<top level folder>/<catalogue match folder>/<chunk>/`
//! - `<save folder>/<chunk>/<primary name>_super_match.csv`

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::error::util::validate_directory;

/// Suffix of every per-chunk super-match file
pub const SUPER_MATCH_SUFFIX: &str = "_super_match.csv";

/// Names of the immediate subdirectories of `root`, sorted.
///
/// Plain files are ignored.
pub fn discover_chunks(root: &Path) -> Result<Vec<String>> {
    validate_directory(root, "discovering chunk folders")?;

    let mut chunks = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            chunks.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    chunks.sort();
    Ok(chunks)
}

/// `<primary root>/<chunk>/<primary filename>`
#[must_use]
pub fn primary_chunk_path(primary_root: &Path, chunk_id: &str, filename: &str) -> PathBuf {
    primary_root.join(chunk_id).join(filename)
}

/// `<top level folder>/<match folder>/<chunk>`
#[must_use]
pub fn cross_match_chunk_folder(
    top_level_folder: &Path,
    match_folder: &Path,
    chunk_id: &str,
) -> PathBuf {
    top_level_folder.join(match_folder).join(chunk_id)
}

/// `<save folder>/<chunk>/<primary name>_super_match.csv`
#[must_use]
pub fn super_match_output_path(
    save_folder: &Path,
    chunk_id: &str,
    primary_catalogue_name: &str,
) -> PathBuf {
    save_folder
        .join(chunk_id)
        .join(format!("{primary_catalogue_name}{SUPER_MATCH_SUFFIX}"))
}
