//! Error handling for super-match runs.

pub mod util;

use std::path::PathBuf;

/// Errors that can occur while building a super-match
#[derive(Debug, thiserror::Error)]
pub enum SuperMatchError {
    /// An expected input file does not exist
    #[error("File not found: {} (needed for {purpose})", .path.display())]
    MissingFile { path: PathBuf, purpose: String },

    /// A path that should be a directory is something else
    #[error("Not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// Declared column index is outside the width of a row
    #[error(
        "Column {column} out of range in {} (row {row} has {width} fields)",
        .path.display()
    )]
    ColumnIndex {
        path: PathBuf,
        column: usize,
        width: usize,
        row: usize,
    },

    /// A cell that should hold a probability could not be parsed
    #[error(
        "Invalid value {value:?} in {} (row {row}, column {column})",
        .path.display()
    )]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },

    /// A match or non-match record references a primary ID absent from the chunk
    #[error("Unknown primary ID {id:?} in catalogue {catalogue}")]
    UnknownId { id: String, catalogue: String },

    /// An error raised inside a parallel chunk task
    #[error("Chunk {chunk} failed: {source}")]
    WorkerTask {
        chunk: String,
        #[source]
        source: Box<SuperMatchError>,
    },

    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or writing delimited data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SuperMatchError {
    /// Wrap an error raised while processing `chunk`
    #[must_use]
    pub fn in_chunk(self, chunk: impl Into<String>) -> Self {
        Self::WorkerTask {
            chunk: chunk.into(),
            source: Box::new(self),
        }
    }

    /// Short label for the kind of failure, as reported to the user
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing file",
            Self::NotADirectory { .. } => "not a directory",
            Self::ColumnIndex { .. } => "column index",
            Self::InvalidValue { .. } => "invalid value",
            Self::UnknownId { .. } => "unknown id",
            Self::WorkerTask { .. } => "worker task",
            Self::Config(_) => "configuration",
            Self::Csv(_) => "csv",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::ThreadPool(_) => "thread pool",
        }
    }

    /// The chunk a worker task error came from, if any
    #[must_use]
    pub fn chunk(&self) -> Option<&str> {
        match self {
            Self::WorkerTask { chunk, .. } => Some(chunk.as_str()),
            _ => None,
        }
    }

    /// The innermost error, unwrapping any worker task layers
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::WorkerTask { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The secondary catalogue involved, when the failure names one
    #[must_use]
    pub fn catalogue(&self) -> Option<&str> {
        match self.root_cause() {
            Self::UnknownId { catalogue, .. } => Some(catalogue.as_str()),
            _ => None,
        }
    }
}

/// Result type for super-match operations
pub type Result<T> = std::result::Result<T, SuperMatchError>;
