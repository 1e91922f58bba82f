//! Super-match table output.

use std::fs;
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::error::Result;
use crate::loader::DELIMITER;
use crate::models::SuperMatchTable;

/// Write a super-match table as a headerless delimited file, creating the
/// parent directory if needed.
///
/// Column order is primary ID, one secondary ID per catalogue in catalogue
/// order, cumulative probability, worst catalogue, and probability without
/// the worst catalogue.
pub fn write_super_match(table: &SuperMatchTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;

    for fields in table.record_lines() {
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    log::debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
