//! Logging utilities
//!
//! Consistent messages for run and chunk level operations.

use std::path::Path;
use std::time::Duration;

use crate::error::SuperMatchError;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} items into {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} items into {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log a failed run with the error kind, chunk and catalogue it came from
pub fn log_failure(error: &SuperMatchError) {
    let cause = error.root_cause();
    log::error!(
        "Super-match failed ({}) in chunk {} for catalogue {}: {}",
        cause.kind(),
        error.chunk().unwrap_or("-"),
        error.catalogue().unwrap_or("-"),
        cause
    );
}
