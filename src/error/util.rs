//! Utility functions for error handling
//!
//! Checked file and directory access that maps failures onto
//! [`SuperMatchError`] variants carrying the offending path.

use std::fs;
use std::path::Path;

use crate::error::{Result, SuperMatchError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(SuperMatchError::MissingFile {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        });
    }

    Ok(fs::File::open(path)?)
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(SuperMatchError::MissingFile {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        });
    }

    if !path.is_dir() {
        return Err(SuperMatchError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    // Try to read the directory to check permissions
    fs::read_dir(path)?;
    Ok(())
}
