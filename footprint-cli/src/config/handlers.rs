use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use footprint_core::models::SimulationConfig;

pub fn run_config(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("--output is required")?;

    SimulationConfig::default().to_file(&output)?;
    info!("Example configuration written to {}", output.display());

    Ok(())
}
