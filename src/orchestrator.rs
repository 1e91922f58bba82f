//! Super-match runs across every catalogue and every chunk.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::algorithm::merge_chunk;
use crate::config::SuperMatchConfig;
use crate::dispatcher::{ChunkTask, build_tasks, run_tasks};
use crate::error::Result;
use crate::loader::{load_catalogue_column, load_match_record, load_non_match_record};
use crate::models::CatalogueRecords;
use crate::utils::io::chunks::discover_chunks;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};
use crate::writer::write_super_match;

/// Result of building one chunk's super-match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub chunk_id: String,
    pub rows: usize,
}

/// Totals of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub chunks: usize,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Builds super-matches: the merger of one primary catalogue's pairwise
/// cross-matches against several secondary catalogues.
///
/// Every chunk folder under the primary catalogue root is assumed to exist,
/// with the same meaning, inside every catalogue's cross-match folder.
#[derive(Debug, Clone)]
pub struct SuperMatch {
    config: Arc<SuperMatchConfig>,
}

impl SuperMatch {
    /// Validate `config` and prepare a run
    pub fn new(config: SuperMatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SuperMatchConfig {
        &self.config
    }

    /// One task per chunk folder found under the primary catalogue root
    pub fn tasks(&self) -> Result<Vec<ChunkTask>> {
        let chunk_ids = discover_chunks(&self.config.primary_catalogue_input_location)?;
        Ok(build_tasks(&chunk_ids, &self.config))
    }

    /// Build the super-match of every chunk.
    ///
    /// Fails on the first chunk error; chunks finished before it keep their
    /// output files.
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        log_operation_start(
            "Building super-match from chunks in",
            &self.config.primary_catalogue_input_location,
        );

        let tasks = self.tasks()?;
        if tasks.is_empty() {
            log_warning(
                "No chunk folders found",
                Some(&self.config.primary_catalogue_input_location),
            );
        }

        let outcomes = run_tasks(
            &tasks,
            self.config.pool_size(),
            self.config.show_progress,
            Self::run_chunk,
        )?;

        let summary = RunSummary {
            chunks: outcomes.len(),
            rows: outcomes.iter().map(|o| o.rows).sum(),
            elapsed: start.elapsed(),
        };
        log_operation_complete(
            &format!("merged {} chunks,", summary.chunks),
            &self.config.super_match_save_folder,
            summary.rows,
            Some(summary.elapsed),
        );
        Ok(summary)
    }

    /// Load, merge and write a single chunk
    pub fn run_chunk(task: &ChunkTask) -> Result<ChunkOutcome> {
        let config = &task.config;
        let primary_ids = load_catalogue_column(
            &task.primary_catalogue_path,
            config.primary_catalogue_input_column_id,
        )?;

        let records = config
            .catalogues
            .iter()
            .zip(&task.cross_match_folders)
            .map(|(catalogue, folder)| {
                let matches = load_match_record(
                    &folder.join(&catalogue.match_filename),
                    catalogue.match_primary_column,
                    catalogue.match_secondary_column,
                    catalogue.match_probability_column,
                )?;
                let non_matches = load_non_match_record(
                    &folder.join(&catalogue.non_match_filename),
                    catalogue.non_match_primary_column,
                    catalogue.non_match_probability_column,
                )?;
                Ok(CatalogueRecords::new(matches, non_matches))
            })
            .collect::<Result<Vec<_>>>()?;

        let table = merge_chunk(primary_ids, config.catalogue_names(), &records)?;
        write_super_match(&table, &task.output_path)?;

        debug!("Chunk {} merged into {} rows", task.chunk_id, table.len());
        Ok(ChunkOutcome {
            chunk_id: task.chunk_id.clone(),
            rows: table.len(),
        })
    }
}
