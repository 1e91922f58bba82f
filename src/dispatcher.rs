//! Chunk-level parallel fan-out
//!
//! Every chunk becomes one self-contained [`ChunkTask`]. Tasks run on a
//! dedicated rayon pool; the first failing task stops further work and its
//! error is returned wrapped in [`SuperMatchError::WorkerTask`]. Output files
//! already written by other chunks are left in place.

use std::path::PathBuf;
use std::sync::Arc;

use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use crate::config::SuperMatchConfig;
use crate::error::{Result, SuperMatchError};
use crate::utils::io::chunks::{
    cross_match_chunk_folder, primary_chunk_path, super_match_output_path,
};
use crate::utils::logging::progress;

/// Everything one worker needs to build the super-match of one chunk
#[derive(Debug, Clone)]
pub struct ChunkTask {
    pub chunk_id: String,
    /// The chunk's primary catalogue file
    pub primary_catalogue_path: PathBuf,
    /// One cross-match folder per catalogue, in catalogue order
    pub cross_match_folders: Vec<PathBuf>,
    /// Destination of the chunk's super-match table
    pub output_path: PathBuf,
    /// Catalogue-invariant run parameters
    pub config: Arc<SuperMatchConfig>,
}

impl ChunkTask {
    /// Derive the per-chunk paths of `chunk_id` from the run configuration
    #[must_use]
    pub fn new(chunk_id: impl Into<String>, config: Arc<SuperMatchConfig>) -> Self {
        let chunk_id = chunk_id.into();
        let primary_catalogue_path = primary_chunk_path(
            &config.primary_catalogue_input_location,
            &chunk_id,
            &config.primary_catalogue_filename,
        );
        let cross_match_folders = config
            .catalogues
            .iter()
            .map(|c| cross_match_chunk_folder(&config.top_level_folder, &c.match_folder, &chunk_id))
            .collect_vec();
        let output_path = super_match_output_path(
            &config.super_match_save_folder,
            &chunk_id,
            &config.primary_catalogue_name,
        );

        Self {
            chunk_id,
            primary_catalogue_path,
            cross_match_folders,
            output_path,
            config,
        }
    }
}

/// One task per chunk, in the given chunk order
#[must_use]
pub fn build_tasks(chunk_ids: &[String], config: &Arc<SuperMatchConfig>) -> Vec<ChunkTask> {
    chunk_ids
        .iter()
        .map(|chunk_id| ChunkTask::new(chunk_id.as_str(), Arc::clone(config)))
        .collect()
}

/// Tasks handed to a worker at a time: `max(1, chunk_count / pool_size)`
#[must_use]
pub fn dispatch_chunksize(chunk_count: usize, pool_size: usize) -> usize {
    (chunk_count / pool_size.max(1)).max(1)
}

/// Run `worker` over every task on a pool of `pool_size` threads.
///
/// Results are returned in task order, but tasks complete in no particular
/// order. On the first error no new tasks are started.
pub fn run_tasks<T, F>(
    tasks: &[ChunkTask],
    pool_size: usize,
    show_progress: bool,
    worker: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&ChunkTask) -> Result<T> + Sync,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size)
        .thread_name(|i| format!("super-match-{i}"))
        .build()?;
    let chunksize = dispatch_chunksize(tasks.len(), pool_size);
    info!(
        "Dispatching {} chunks over {} workers (chunksize {})",
        tasks.len(),
        pool_size,
        chunksize
    );

    let pb = progress::create_main_progress_bar(
        tasks.len() as u64,
        Some("Building super-match chunks"),
        show_progress,
    );

    let results = pool.install(|| {
        tasks
            .par_iter()
            .with_min_len(chunksize)
            .map(|task| {
                let outcome = worker(task).map_err(|e| wrap_task_error(e, &task.chunk_id));
                pb.inc(1);
                outcome
            })
            .collect::<Result<Vec<T>>>()
    });

    match &results {
        Ok(_) => progress::finish_progress_bar(&pb, Some("Super-match complete")),
        Err(_) => progress::finish_and_clear(&pb),
    }
    results
}

fn wrap_task_error(error: SuperMatchError, chunk_id: &str) -> SuperMatchError {
    match error {
        already @ SuperMatchError::WorkerTask { .. } => already,
        other => other.in_chunk(chunk_id),
    }
}
