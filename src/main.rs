use std::path::PathBuf;

use anyhow::Context;
use log::info;
use super_match::utils::logging::log_failure;
use super_match::{SuperMatch, SuperMatchConfig};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: super-match <config.json>")?;

    let config = SuperMatchConfig::from_json_file(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    info!(
        "Super-match of {} against {} catalogues",
        config.primary_catalogue_name,
        config.catalogues.len()
    );

    match SuperMatch::new(config)?.run() {
        Ok(summary) => {
            info!(
                "Wrote {} chunks ({} rows) in {:?}",
                summary.chunks, summary.rows, summary.elapsed
            );
            Ok(())
        }
        Err(e) => {
            log_failure(&e);
            std::process::exit(1);
        }
    }
}
