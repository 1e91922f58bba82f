//! Utilities for logging and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{log_failure, log_operation_complete, log_operation_start, log_warning};
pub use self::progress::{create_main_progress_bar, finish_and_clear, finish_progress_bar};
