//! Configuration for a super-match run.

use std::path::{Path, PathBuf};

use itertools::{Itertools, izip};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{Result, SuperMatchError};

/// Environment variable overriding the worker-pool size
pub const POOL_SIZE_ENV: &str = "SUPER_MATCH_POOL_SIZE";

/// One secondary catalogue cross-matched against the primary catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// Catalogue name, used for the worst-catalogue column
    pub name: String,
    /// Folder holding this cross-match, relative to the top-level folder
    pub match_folder: PathBuf,
    /// Per-chunk filename of the match table
    pub match_filename: String,
    /// Per-chunk filename of the primary non-match table
    pub non_match_filename: String,
    /// Zero-indexed column of the primary ID in the match table
    pub match_primary_column: usize,
    /// Zero-indexed column of the secondary ID in the match table
    pub match_secondary_column: usize,
    /// Zero-indexed column of the match probability
    pub match_probability_column: usize,
    /// Zero-indexed column of the primary ID in the non-match table
    pub non_match_primary_column: usize,
    /// Zero-indexed column of the non-match probability
    pub non_match_probability_column: usize,
}

/// Configuration for a super-match across all catalogues and all chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperMatchConfig {
    /// Folder containing every pairwise cross-match
    pub top_level_folder: PathBuf,
    /// Name of the primary catalogue
    pub primary_catalogue_name: String,
    /// Root of the primary catalogue; its subfolders are the chunks
    pub primary_catalogue_input_location: PathBuf,
    /// Zero-indexed column of the ID in the primary catalogue file
    pub primary_catalogue_input_column_id: usize,
    /// Per-chunk filename of the primary catalogue
    pub primary_catalogue_filename: String,
    /// Root folder for the per-chunk super-match tables
    pub super_match_save_folder: PathBuf,
    /// Secondary catalogues, in merge order
    pub catalogues: Vec<CatalogueConfig>,
    /// Number of worker threads
    #[serde(default = "num_cpus::get")]
    pub n_pool: usize,
    /// Draw a progress bar over chunks
    #[serde(default)]
    pub show_progress: bool,
}

impl SuperMatchConfig {
    /// Build a configuration from the parallel-list form, one list per
    /// per-catalogue parameter, all in the same catalogue order.
    #[allow(clippy::too_many_arguments)]
    pub fn from_lists(
        top_level_folder: impl Into<PathBuf>,
        primary_catalogue_name: impl Into<String>,
        primary_catalogue_input_location: impl Into<PathBuf>,
        primary_catalogue_input_column_id: usize,
        primary_catalogue_filename: impl Into<String>,
        super_match_save_folder: impl Into<PathBuf>,
        catalogue_names: &[&str],
        secondary_match_folders: &[&str],
        match_filenames: &[&str],
        non_match_filenames: &[&str],
        match_primary_columns: &[usize],
        match_secondary_columns: &[usize],
        match_probability_columns: &[usize],
        non_match_primary_columns: &[usize],
        non_match_probability_columns: &[usize],
        n_pool: usize,
    ) -> Result<Self> {
        let lengths = [
            ("secondary match folders", secondary_match_folders.len()),
            ("match filenames", match_filenames.len()),
            ("non-match filenames", non_match_filenames.len()),
            ("match primary columns", match_primary_columns.len()),
            ("match secondary columns", match_secondary_columns.len()),
            ("match probability columns", match_probability_columns.len()),
            ("non-match primary columns", non_match_primary_columns.len()),
            ("non-match probability columns", non_match_probability_columns.len()),
        ];
        if let Some((label, len)) = lengths
            .iter()
            .find(|(_, len)| *len != catalogue_names.len())
        {
            return Err(SuperMatchError::Config(format!(
                "{} catalogue names but {len} {label}",
                catalogue_names.len()
            )));
        }

        let catalogues = izip!(
            catalogue_names,
            secondary_match_folders,
            match_filenames,
            non_match_filenames,
            match_primary_columns,
            match_secondary_columns,
            match_probability_columns,
        )
        .zip(izip!(
            non_match_primary_columns,
            non_match_probability_columns
        ))
        .map(
            |(
                (name, folder, match_file, non_match_file, m_primary, m_secondary, m_prob),
                (n_primary, n_prob),
            )| CatalogueConfig {
                name: (*name).to_string(),
                match_folder: PathBuf::from(*folder),
                match_filename: (*match_file).to_string(),
                non_match_filename: (*non_match_file).to_string(),
                match_primary_column: *m_primary,
                match_secondary_column: *m_secondary,
                match_probability_column: *m_prob,
                non_match_primary_column: *n_primary,
                non_match_probability_column: *n_prob,
            },
        )
        .collect();

        let config = Self {
            top_level_folder: top_level_folder.into(),
            primary_catalogue_name: primary_catalogue_name.into(),
            primary_catalogue_input_location: primary_catalogue_input_location.into(),
            primary_catalogue_input_column_id,
            primary_catalogue_filename: primary_catalogue_filename.into(),
            super_match_save_folder: super_match_save_folder.into(),
            catalogues,
            n_pool,
            show_progress: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "loading super-match configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for inconsistencies the merge cannot recover from
    pub fn validate(&self) -> Result<()> {
        if self.catalogues.is_empty() {
            return Err(SuperMatchError::Config(
                "at least one secondary catalogue is required".to_string(),
            ));
        }
        if self.n_pool == 0 {
            return Err(SuperMatchError::Config(
                "worker pool size must be at least 1".to_string(),
            ));
        }
        if self.primary_catalogue_name.is_empty() {
            return Err(SuperMatchError::Config(
                "primary catalogue name is empty".to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for catalogue in &self.catalogues {
            if catalogue.name.is_empty() {
                return Err(SuperMatchError::Config(
                    "secondary catalogue name is empty".to_string(),
                ));
            }
            if catalogue.name == self.primary_catalogue_name {
                return Err(SuperMatchError::Config(format!(
                    "secondary catalogue {} shares the primary catalogue's name",
                    catalogue.name
                )));
            }
            if !seen.insert(catalogue.name.as_str()) {
                return Err(SuperMatchError::Config(format!(
                    "duplicate catalogue name {}",
                    catalogue.name
                )));
            }
        }
        Ok(())
    }

    /// Catalogue names in merge order
    #[must_use]
    pub fn catalogue_names(&self) -> Vec<String> {
        self.catalogues.iter().map(|c| c.name.clone()).collect_vec()
    }

    /// Worker-pool size, honouring the environment override
    #[must_use]
    pub fn pool_size(&self) -> usize {
        std::env::var(POOL_SIZE_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.n_pool)
    }
}
